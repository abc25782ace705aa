//! Boolean action checks over a single pose.
//!
//! Every predicate resolves hidden keypoints to `false`.

use crate::{
    angle,
    config::Thresholds,
    pose::{KeypointKind, Pose, Side},
};
use std::fmt;

/// Wrist separation must exceed this multiple of shoulder separation for spread arms.
pub const ARMS_SPREAD_RATIO: f64 = 1.5;

/// Largest eye height difference, relative to eye separation, for a level head.
pub const EYE_LEVEL_RATIO: f64 = 0.3;

/// Smallest eye score difference that indicates a turned head.
pub const HEAD_TURN_SCORE_GAP: f32 = 0.3;

/// Knee angles below this, in degrees, indicate a squat.
pub const SQUAT_KNEE_ANGLE: f64 = 120.0;

/// True when `upper` is visible, `lower` is visible and `upper` is higher in the image.
pub fn is_above(pose: &Pose, upper: KeypointKind, lower: KeypointKind, threshold: f32) -> bool {
    match (pose.visible(upper, threshold), pose.visible(lower, threshold)) {
        (Some(upper), Some(lower)) => upper.y() < lower.y(),
        _ => false,
    }
}

pub fn arm_raised(pose: &Pose, side: Side, threshold: f32) -> bool {
    is_above(
        pose,
        KeypointKind::wrist(side),
        KeypointKind::shoulder(side),
        threshold,
    )
}

/// Either arm raised.
pub fn hand_raised(pose: &Pose, threshold: f32) -> bool {
    arm_raised(pose, Side::Left, threshold) || arm_raised(pose, Side::Right, threshold)
}

pub fn arms_spread(pose: &Pose, threshold: f32) -> bool {
    use crate::pose::KeypointKind::*;

    let visible = |kind| pose.visible(kind, threshold);
    match (
        visible(LeftShoulder),
        visible(RightShoulder),
        visible(LeftWrist),
        visible(RightWrist),
    ) {
        (Some(ls), Some(rs), Some(lw), Some(rw)) => {
            let shoulder_width = f64::from((rs.x() - ls.x()).abs());
            let wrist_width = f64::from((rw.x() - lw.x()).abs());
            wrist_width > shoulder_width * ARMS_SPREAD_RATIO
        }
        _ => false,
    }
}

/// Hip above knee on at least one side.
pub fn standing(pose: &Pose, threshold: f32) -> bool {
    [Side::Left, Side::Right].iter().any(|&side| {
        is_above(
            pose,
            KeypointKind::hip(side),
            KeypointKind::knee(side),
            threshold,
        )
    })
}

/// Knee bent below [`SQUAT_KNEE_ANGLE`] on at least one side with hip, knee and ankle visible.
pub fn squatting(pose: &Pose, threshold: f32) -> bool {
    [Side::Left, Side::Right].iter().any(|&side| {
        angle::joint_angle(pose, angle::Joint::Knee(side), threshold)
            .map_or(false, |degrees| degrees < SQUAT_KNEE_ANGLE)
    })
}

/// Nose and both eyes visible with the eyes roughly level.
pub fn facing_forward(pose: &Pose, threshold: f32) -> bool {
    use crate::pose::KeypointKind::*;

    match (
        pose.visible(Nose, threshold),
        pose.visible(LeftEye, threshold),
        pose.visible(RightEye, threshold),
    ) {
        (Some(_), Some(left), Some(right)) => {
            let height_diff = f64::from((left.y() - right.y()).abs());
            let width = f64::from((left.x() - right.x()).abs());
            width > 0.0 && height_diff / width < EYE_LEVEL_RATIO
        }
        _ => false,
    }
}

/// One eye seen much more confidently than the other.
///
/// This compares scores, not positions.
pub fn head_turned(pose: &Pose, threshold: f32) -> bool {
    let left = pose[KeypointKind::eye(Side::Left)].score;
    let right = pose[KeypointKind::eye(Side::Right)].score;
    (left > threshold || right > threshold) && (left - right).abs() > HEAD_TURN_SCORE_GAP
}

/// The full catalogue of predicates.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Action {
    ArmRaised(Side),
    ArmsSpread,
    Standing,
    Squatting,
    FacingForward,
    HeadTurned,
}

impl Action {
    pub const ALL: [Action; 7] = [
        Action::ArmRaised(Side::Left),
        Action::ArmRaised(Side::Right),
        Action::ArmsSpread,
        Action::Standing,
        Action::Squatting,
        Action::FacingForward,
        Action::HeadTurned,
    ];

    pub fn check(self, pose: &Pose, thresholds: &Thresholds) -> bool {
        let threshold = thresholds.confidence;
        match self {
            Self::ArmRaised(side) => arm_raised(pose, side, threshold),
            Self::ArmsSpread => arms_spread(pose, threshold),
            Self::Standing => standing(pose, threshold),
            Self::Squatting => squatting(pose, threshold),
            Self::FacingForward => facing_forward(pose, threshold),
            Self::HeadTurned => head_turned(pose, thresholds.head_turn_confidence),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ArmRaised(side) => write!(f, "{} arm raised", side),
            Self::ArmsSpread => f.write_str("arms spread"),
            Self::Standing => f.write_str("standing"),
            Self::Squatting => f.write_str("squatting"),
            Self::FacingForward => f.write_str("facing forward"),
            Self::HeadTurned => f.write_str("head turned"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::{tests::pose_with, KeypointKind::*};

    fn arm(wrist_y: f32) -> Pose {
        pose_with(
            0.0,
            &[
                (LeftShoulder, (100.0, 200.0, 0.9)),
                (LeftWrist, (110.0, wrist_y, 0.9)),
            ],
        )
    }

    fn spread(shoulder_width: f32, wrist_width: f32) -> Pose {
        pose_with(
            0.0,
            &[
                (LeftShoulder, (300.0 + shoulder_width / 2.0, 200.0, 0.9)),
                (RightShoulder, (300.0 - shoulder_width / 2.0, 200.0, 0.9)),
                (LeftWrist, (300.0 + wrist_width / 2.0, 220.0, 0.9)),
                (RightWrist, (300.0 - wrist_width / 2.0, 220.0, 0.9)),
            ],
        )
    }

    #[test]
    fn left_arm_raised() {
        assert!(arm_raised(&arm(100.0), Side::Left, 0.5));
        assert!(!arm_raised(&arm(300.0), Side::Left, 0.5));
        assert!(!arm_raised(&arm(100.0), Side::Right, 0.5));
        assert!(hand_raised(&arm(100.0), 0.5));
        assert!(!hand_raised(&arm(300.0), 0.5));
    }

    #[test]
    fn arm_raised_needs_visible_wrist() {
        let pose = pose_with(
            0.0,
            &[
                (LeftShoulder, (100.0, 200.0, 0.9)),
                (LeftWrist, (110.0, 100.0, 0.4)),
            ],
        );
        assert!(!arm_raised(&pose, Side::Left, 0.5));
    }

    #[test]
    fn spread_arms() {
        assert!(arms_spread(&spread(100.0, 200.0), 0.5));
        assert!(!arms_spread(&spread(100.0, 120.0), 0.5));
        // exactly 1.5x is not enough
        assert!(!arms_spread(&spread(100.0, 150.0), 0.5));
    }

    #[test]
    fn spread_arms_hidden_wrist() {
        let mut values = crate::pose::tests::uniform(0.0);
        for &(kind, x) in [
            (LeftShoulder, 350.0),
            (RightShoulder, 250.0),
            (LeftWrist, 400.0),
        ]
        .iter()
        {
            values[kind.idx()] = (x, 200.0, 0.9);
        }
        values[RightWrist.idx()] = (200.0, 200.0, 0.4);
        let pose = Pose::from_keypoints(&values).unwrap();
        assert!(!arms_spread(&pose, 0.5));
    }

    #[test]
    fn standing_on_either_side() {
        let left_only = pose_with(
            0.0,
            &[(LeftHip, (0.0, 300.0, 0.9)), (LeftKnee, (0.0, 400.0, 0.9))],
        );
        assert!(standing(&left_only, 0.5));

        let right_only = pose_with(
            0.0,
            &[(RightHip, (0.0, 300.0, 0.9)), (RightKnee, (0.0, 400.0, 0.9))],
        );
        assert!(standing(&right_only, 0.5));

        let inverted = pose_with(
            0.0,
            &[(LeftHip, (0.0, 400.0, 0.9)), (LeftKnee, (0.0, 300.0, 0.9))],
        );
        assert!(!standing(&inverted, 0.5));

        let level = pose_with(
            0.0,
            &[(LeftHip, (0.0, 300.0, 0.9)), (LeftKnee, (10.0, 300.0, 0.9))],
        );
        assert!(!standing(&level, 0.5));
    }

    #[test]
    fn squat_from_knee_angle() {
        let bent = pose_with(
            0.0,
            &[
                (LeftHip, (0.0, 300.0, 0.9)),
                (LeftKnee, (100.0, 300.0, 0.9)),
                (LeftAnkle, (100.0, 400.0, 0.9)),
            ],
        );
        assert!(squatting(&bent, 0.5));

        let straight = pose_with(
            0.0,
            &[
                (RightHip, (0.0, 300.0, 0.9)),
                (RightKnee, (0.0, 400.0, 0.9)),
                (RightAnkle, (0.0, 500.0, 0.9)),
            ],
        );
        assert!(!squatting(&straight, 0.5));
        assert!(!squatting(&pose_with(0.0, &[]), 0.5));
    }

    #[test]
    fn facing_forward_eyes_level() {
        let level = pose_with(
            0.0,
            &[
                (Nose, (100.0, 110.0, 0.9)),
                (LeftEye, (110.0, 100.0, 0.9)),
                (RightEye, (90.0, 102.0, 0.9)),
            ],
        );
        assert!(facing_forward(&level, 0.5));

        let tilted = pose_with(
            0.0,
            &[
                (Nose, (100.0, 110.0, 0.9)),
                (LeftEye, (110.0, 100.0, 0.9)),
                (RightEye, (90.0, 110.0, 0.9)),
            ],
        );
        assert!(!facing_forward(&tilted, 0.5));
    }

    #[test]
    fn facing_forward_zero_eye_width() {
        let stacked = pose_with(
            0.0,
            &[
                (Nose, (100.0, 110.0, 0.9)),
                (LeftEye, (100.0, 100.0, 0.9)),
                (RightEye, (100.0, 100.0, 0.9)),
            ],
        );
        assert!(!facing_forward(&stacked, 0.5));
    }

    #[test]
    fn facing_forward_hidden_nose() {
        let pose = pose_with(
            0.0,
            &[
                (Nose, (100.0, 110.0, 0.4)),
                (LeftEye, (110.0, 100.0, 0.9)),
                (RightEye, (90.0, 100.0, 0.9)),
            ],
        );
        assert!(!facing_forward(&pose, 0.5));
    }

    #[test]
    fn head_turned_by_eye_scores() {
        let turned = pose_with(
            0.0,
            &[(LeftEye, (0.0, 0.0, 0.9)), (RightEye, (0.0, 0.0, 0.2))],
        );
        assert!(head_turned(&turned, 0.3));

        let both_seen = pose_with(
            0.0,
            &[(LeftEye, (0.0, 0.0, 0.9)), (RightEye, (0.0, 0.0, 0.8))],
        );
        assert!(!head_turned(&both_seen, 0.3));

        let neither_seen = pose_with(
            0.0,
            &[(LeftEye, (0.0, 0.0, 0.25)), (RightEye, (0.0, 0.0, 0.0))],
        );
        assert!(!head_turned(&neither_seen, 0.3));
    }

    #[test]
    fn checks_are_order_independent() {
        let pose = pose_with(
            0.9,
            &[
                (LeftShoulder, (150.0, 200.0, 0.9)),
                (RightShoulder, (50.0, 200.0, 0.9)),
                (LeftWrist, (250.0, 100.0, 0.9)),
                (RightWrist, (-50.0, 300.0, 0.9)),
                (LeftHip, (140.0, 400.0, 0.9)),
                (LeftKnee, (140.0, 500.0, 0.9)),
            ],
        );
        let thresholds = Thresholds::default();
        let forward = Action::ALL
            .iter()
            .map(|action| action.check(&pose, &thresholds))
            .collect::<Vec<_>>();
        let mut backward = Action::ALL
            .iter()
            .rev()
            .map(|action| action.check(&pose, &thresholds))
            .collect::<Vec<_>>();
        backward.reverse();
        assert_eq!(forward, backward);
        assert!(Action::ArmRaised(Side::Left).check(&pose, &thresholds));
        assert!(!Action::ArmRaised(Side::Right).check(&pose, &thresholds));
        assert!(Action::ArmsSpread.check(&pose, &thresholds));
        assert!(Action::Standing.check(&pose, &thresholds));
    }

    #[test]
    fn hidden_pose_is_all_false() {
        let pose = pose_with(0.4, &[]);
        let thresholds = Thresholds::default();
        for action in Action::ALL.iter() {
            if *action == Action::HeadTurned {
                continue;
            }
            assert!(!action.check(&pose, &thresholds), "{} was true", action);
        }
        // equal eye scores never look turned
        assert!(!Action::HeadTurned.check(&pose, &thresholds));
    }

    #[test]
    fn display() {
        assert_eq!(Action::ArmRaised(Side::Right).to_string(), "right arm raised");
        assert_eq!(Action::HeadTurned.to_string(), "head turned");
    }
}
