//! Left/right balance of a keypoint pair around a central reference.
//!
//! Only horizontal offsets are compared, so a person rotated away from the camera scores as
//! asymmetric even when standing straight.

use crate::pose::{Keypoint, KeypointKind, Pose};
use tracing::trace;

/// Ratio of the smaller to the larger horizontal offset of `left` and `right` from `center`.
///
/// Returns a score in `(0, 1]` where `1.0` is perfectly balanced, or `0.0` when exactly one
/// side sits on the center line. Two points both on the center line count as balanced.
/// `None` if any coordinate is not finite.
pub fn symmetry_between(left: f32, right: f32, center: f32) -> Option<f64> {
    let left_dist = (f64::from(left) - f64::from(center)).abs();
    let right_dist = (f64::from(right) - f64::from(center)).abs();
    if !left_dist.is_finite() || !right_dist.is_finite() {
        return None;
    }
    let max = left_dist.max(right_dist);
    if max > 0.0 {
        Some(left_dist.min(right_dist) / max)
    } else {
        Some(1.0)
    }
}

/// Symmetry score of a keypoint pair, or `None` if any keypoint is at or below `threshold`.
pub fn symmetry(
    left: &Keypoint,
    right: &Keypoint,
    center: &Keypoint,
    threshold: f32,
) -> Option<f64> {
    if let Some(hidden) = [left, right, center]
        .iter()
        .find(|keypoint| !keypoint.is_visible(threshold))
    {
        trace!(
            message = "symmetry undefined: keypoint not visible",
            kind = %hidden.kind,
            score = hidden.score,
            threshold
        );
        return None;
    }
    symmetry_between(left.point.x(), right.point.x(), center.point.x())
}

/// Symmetry of the pair `(left, left.mirror())` around `center` within one pose.
pub fn pair_symmetry(
    pose: &Pose,
    left: KeypointKind,
    center: KeypointKind,
    threshold: f32,
) -> Option<f64> {
    symmetry(&pose[left], &pose[left.mirror()], &pose[center], threshold)
}
