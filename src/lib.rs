//! Joint angles, left/right symmetry and simple action checks over a single
//! 17-keypoint COCO pose.
//!
//! Poses come from an upstream pose model. Nothing here runs inference: every function
//! takes an immutable [`Pose`] and returns derived numbers or booleans. Geometric results
//! that depend on a keypoint at or below the confidence threshold are `None`; action
//! predicates treat such keypoints as absent and return `false`.
//!
//! ```
//! use pose_geometry::{angle::joint_angle, angle::Joint, action, Pose, Side, Thresholds};
//!
//! # fn main() -> Result<(), pose_geometry::Error> {
//! let mut values = vec![(0.0, 0.0, 0.0); 17];
//! values[5] = (100.0, 200.0, 0.9); // left shoulder
//! values[7] = (100.0, 300.0, 0.9); // left elbow
//! values[9] = (200.0, 300.0, 0.9); // left wrist
//! let pose = Pose::from_keypoints(&values)?;
//!
//! let threshold = Thresholds::default().confidence;
//! assert_eq!(joint_angle(&pose, Joint::Elbow(Side::Left), threshold).map(f64::round), Some(90.0));
//! assert_eq!(joint_angle(&pose, Joint::Elbow(Side::Right), threshold), None);
//! assert!(!action::arm_raised(&pose, Side::Left, threshold));
//! # Ok(())
//! # }
//! ```

pub mod action;
pub mod analysis;
pub mod angle;
pub mod config;
pub mod error;
pub mod input;
pub mod point;
pub mod pose;
pub mod symmetry;

pub use action::Action;
pub use analysis::PoseAnalysis;
pub use angle::Joint;
pub use config::Thresholds;
pub use error::Error;
pub use point::Point;
pub use pose::{Detection, Keypoint, KeypointKind, Pose, Side, NUM_KEYPOINTS};
