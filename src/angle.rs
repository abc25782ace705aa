//! Interior joint angles from three keypoints.

use crate::{
    error::Error,
    point::Point,
    pose::{Keypoint, KeypointKind, Pose, Side},
};
use std::{fmt, str::FromStr};
use tracing::trace;

/// Vectors shorter than this are treated as having no direction.
pub const MIN_VECTOR_NORM: f64 = 1e-6;

/// Angle at `vertex` between the rays to `p1` and `p3`, in degrees within `[0, 180]`.
///
/// `None` if either ray is degenerate or too long to measure.
pub fn angle_between(p1: Point, vertex: Point, p3: Point) -> Option<f64> {
    let v1 = p1 - vertex;
    let v2 = p3 - vertex;
    let (n1, n2) = (v1.norm(), v2.norm());
    if !n1.is_finite() || !n2.is_finite() || n1 < MIN_VECTOR_NORM || n2 < MIN_VECTOR_NORM {
        return None;
    }
    let cos = v1.dot(v2) / (n1 * n2);
    if cos.is_nan() {
        return None;
    }
    Some(cos.clamp(-1.0, 1.0).acos().to_degrees())
}

/// Angle at `vertex` in degrees, or `None` if any keypoint is at or below `threshold`
/// or the geometry is degenerate.
pub fn angle(p1: &Keypoint, vertex: &Keypoint, p3: &Keypoint, threshold: f32) -> Option<f64> {
    if let Some(hidden) = [p1, vertex, p3]
        .iter()
        .find(|keypoint| !keypoint.is_visible(threshold))
    {
        trace!(
            message = "angle undefined: keypoint not visible",
            kind = %hidden.kind,
            score = hidden.score,
            threshold
        );
        return None;
    }
    let result = angle_between(p1.point, vertex.point, p3.point);
    if result.is_none() {
        trace!(message = "angle undefined: degenerate geometry", vertex = %vertex.kind);
    }
    result
}

/// A named joint, measured at its middle keypoint.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Joint {
    Elbow(Side),
    Knee(Side),
    Shoulder(Side),
}

impl Joint {
    pub const ALL: [Joint; 6] = [
        Joint::Elbow(Side::Left),
        Joint::Elbow(Side::Right),
        Joint::Knee(Side::Left),
        Joint::Knee(Side::Right),
        Joint::Shoulder(Side::Left),
        Joint::Shoulder(Side::Right),
    ];

    /// The `(p1, vertex, p3)` keypoints that define this joint.
    pub fn keypoints(self) -> (KeypointKind, KeypointKind, KeypointKind) {
        match self {
            Self::Elbow(side) => (
                KeypointKind::shoulder(side),
                KeypointKind::elbow(side),
                KeypointKind::wrist(side),
            ),
            Self::Knee(side) => (
                KeypointKind::hip(side),
                KeypointKind::knee(side),
                KeypointKind::ankle(side),
            ),
            Self::Shoulder(side) => (
                KeypointKind::elbow(side),
                KeypointKind::shoulder(side),
                KeypointKind::hip(side),
            ),
        }
    }
}

impl fmt::Display for Joint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (side, name) = match self {
            Self::Elbow(side) => (side, "elbow"),
            Self::Knee(side) => (side, "knee"),
            Self::Shoulder(side) => (side, "shoulder"),
        };
        write!(f, "{}_{}", side, name)
    }
}

impl FromStr for Joint {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|joint| joint.to_string() == s)
            .ok_or_else(|| Error::ParseJoint(s.to_owned()))
    }
}

pub fn joint_angle(pose: &Pose, joint: Joint, threshold: f32) -> Option<f64> {
    let (p1, vertex, p3) = joint.keypoints();
    angle(&pose[p1], &pose[vertex], &pose[p3], threshold)
}
