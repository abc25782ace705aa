//! Whole-pose reports combining angles, symmetry, actions and visibility.

use crate::{
    action::Action,
    angle::{joint_angle, Joint},
    config::Thresholds,
    pose::{KeypointKind, Pose, NUM_KEYPOINTS},
    symmetry::pair_symmetry,
};
use std::fmt;
use tracing::debug;

/// Angles of the six named joints, in [`Joint::ALL`] order. `None` is undefined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointAngles([Option<f64>; 6]);

impl JointAngles {
    pub fn compute(pose: &Pose, threshold: f32) -> Self {
        let mut angles = [None; 6];
        for (slot, &joint) in angles.iter_mut().zip(Joint::ALL.iter()) {
            *slot = joint_angle(pose, joint, threshold);
        }
        Self(angles)
    }

    pub fn get(&self, joint: Joint) -> Option<f64> {
        Joint::ALL
            .iter()
            .position(|&j| j == joint)
            .and_then(|i| self.0[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = (Joint, Option<f64>)> + '_ {
        Joint::ALL.iter().copied().zip(self.0.iter().copied())
    }
}

/// Shoulder and hip balance around the nose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodySymmetry {
    pub shoulders: Option<f64>,
    pub hips: Option<f64>,
}

impl BodySymmetry {
    pub fn compute(pose: &Pose, threshold: f32) -> Self {
        Self {
            shoulders: pair_symmetry(
                pose,
                KeypointKind::LeftShoulder,
                KeypointKind::Nose,
                threshold,
            ),
            hips: pair_symmetry(pose, KeypointKind::LeftHip, KeypointKind::Nose, threshold),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visibility {
    pub visible: usize,
    pub high_confidence: usize,
}

impl Visibility {
    pub fn compute(pose: &Pose, thresholds: &Thresholds) -> Self {
        Self {
            visible: pose.count_visible(thresholds.confidence),
            high_confidence: pose.count_visible(thresholds.high_confidence),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PoseAnalysis {
    pub visibility: Visibility,
    pub angles: JointAngles,
    pub symmetry: BodySymmetry,
    pub actions: Vec<(Action, bool)>,
}

impl PoseAnalysis {
    pub fn analyze(pose: &Pose, thresholds: &Thresholds) -> Self {
        let threshold = thresholds.confidence;
        let analysis = Self {
            visibility: Visibility::compute(pose, thresholds),
            angles: JointAngles::compute(pose, threshold),
            symmetry: BodySymmetry::compute(pose, threshold),
            actions: Action::ALL
                .iter()
                .map(|&action| (action, action.check(pose, thresholds)))
                .collect(),
        };
        debug!(
            visible = analysis.visibility.visible,
            detected = analysis.detected().count(),
            "analyzed pose"
        );
        analysis
    }

    /// Actions whose predicate held.
    pub fn detected(&self) -> impl Iterator<Item = Action> + '_ {
        self.actions
            .iter()
            .filter(|(_, detected)| *detected)
            .map(|&(action, _)| action)
    }

    pub fn is_detected(&self, action: Action) -> bool {
        self.detected().any(|a| a == action)
    }
}

fn write_optional(f: &mut fmt::Formatter<'_>, value: Option<f64>, unit: &str) -> fmt::Result {
    match value {
        Some(value) => write!(f, "{:.1}{}", value, unit),
        None => f.write_str("undefined"),
    }
}

impl fmt::Display for PoseAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "visible keypoints: {}/{} (high confidence: {}/{})",
            self.visibility.visible, NUM_KEYPOINTS, self.visibility.high_confidence, NUM_KEYPOINTS
        )?;
        writeln!(f, "joint angles:")?;
        for (joint, angle) in self.angles.iter() {
            write!(f, "  {:<16}", joint.to_string())?;
            write_optional(f, angle, " deg")?;
            writeln!(f)?;
        }
        writeln!(f, "symmetry:")?;
        for (name, score) in [("shoulders", self.symmetry.shoulders), ("hips", self.symmetry.hips)]
            .iter()
        {
            write!(f, "  {:<16}", name)?;
            write_optional(f, score.map(|s| s * 100.0), "%")?;
            writeln!(f)?;
        }
        writeln!(f, "actions:")?;
        for (action, detected) in &self.actions {
            writeln!(f, "  [{}] {}", if *detected { "x" } else { " " }, action)?;
        }
        Ok(())
    }
}
