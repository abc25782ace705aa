use crate::{
    error::Error,
    point::{finite, Point},
};
use ndarray::{ArrayView2, ArrayView3, Axis};
use num_traits::FromPrimitive;
use std::{convert::TryFrom, fmt, ops::Index, str::FromStr};

/// COCO body parts, in the order pose models emit them.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, num_derive::FromPrimitive)]
#[repr(usize)]
pub enum KeypointKind {
    Nose,
    LeftEye,
    RightEye,
    LeftEar,
    RightEar,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
}

pub const NUM_KEYPOINTS: usize = 17;

/// x, y and confidence.
pub const VALUES_PER_KEYPOINT: usize = 3;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Left => "left",
            Self::Right => "right",
        })
    }
}

impl KeypointKind {
    pub const ALL: [KeypointKind; NUM_KEYPOINTS] = {
        use crate::pose::KeypointKind::*;
        [
            Nose,
            LeftEye,
            RightEye,
            LeftEar,
            RightEar,
            LeftShoulder,
            RightShoulder,
            LeftElbow,
            RightElbow,
            LeftWrist,
            RightWrist,
            LeftHip,
            RightHip,
            LeftKnee,
            RightKnee,
            LeftAnkle,
            RightAnkle,
        ]
    };

    #[inline]
    pub fn idx(self) -> usize {
        self as usize
    }

    pub fn from_idx(idx: usize) -> Result<Self, Error> {
        Self::from_usize(idx).ok_or(Error::ConvertUSizeToKeypointKind(idx))
    }

    pub fn name(self) -> &'static str {
        use crate::pose::KeypointKind::*;
        match self {
            Nose => "nose",
            LeftEye => "left_eye",
            RightEye => "right_eye",
            LeftEar => "left_ear",
            RightEar => "right_ear",
            LeftShoulder => "left_shoulder",
            RightShoulder => "right_shoulder",
            LeftElbow => "left_elbow",
            RightElbow => "right_elbow",
            LeftWrist => "left_wrist",
            RightWrist => "right_wrist",
            LeftHip => "left_hip",
            RightHip => "right_hip",
            LeftKnee => "left_knee",
            RightKnee => "right_knee",
            LeftAnkle => "left_ankle",
            RightAnkle => "right_ankle",
        }
    }

    /// `None` for the nose, the only part on the body's midline.
    pub fn side(self) -> Option<Side> {
        match self {
            Self::Nose => None,
            // left parts sit on odd indices
            kind if kind.idx() % 2 == 1 => Some(Side::Left),
            _ => Some(Side::Right),
        }
    }

    /// The same body part on the other side. The nose is its own mirror.
    pub fn mirror(self) -> Self {
        match self.side() {
            None => self,
            Some(Side::Left) => Self::ALL[self.idx() + 1],
            Some(Side::Right) => Self::ALL[self.idx() - 1],
        }
    }

    pub fn shoulder(side: Side) -> Self {
        Self::sided(side, Self::LeftShoulder, Self::RightShoulder)
    }

    pub fn elbow(side: Side) -> Self {
        Self::sided(side, Self::LeftElbow, Self::RightElbow)
    }

    pub fn wrist(side: Side) -> Self {
        Self::sided(side, Self::LeftWrist, Self::RightWrist)
    }

    pub fn hip(side: Side) -> Self {
        Self::sided(side, Self::LeftHip, Self::RightHip)
    }

    pub fn knee(side: Side) -> Self {
        Self::sided(side, Self::LeftKnee, Self::RightKnee)
    }

    pub fn ankle(side: Side) -> Self {
        Self::sided(side, Self::LeftAnkle, Self::RightAnkle)
    }

    pub fn eye(side: Side) -> Self {
        Self::sided(side, Self::LeftEye, Self::RightEye)
    }

    fn sided(side: Side, left: Self, right: Self) -> Self {
        match side {
            Side::Left => left,
            Side::Right => right,
        }
    }
}

impl fmt::Display for KeypointKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for KeypointKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| Error::ParseKeypointKind(s.to_owned()))
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Keypoint {
    pub kind: KeypointKind,
    pub point: Point,
    pub score: f32,
}

impl Keypoint {
    pub fn new(kind: KeypointKind, x: f32, y: f32, score: f32) -> Result<Self, Error> {
        Ok(Self {
            kind,
            point: Point::new(x, y)?,
            score: finite(score)?,
        })
    }

    /// A keypoint is usable only when its score is strictly above `threshold`.
    #[inline]
    pub fn is_visible(&self, threshold: f32) -> bool {
        self.score > threshold
    }
}

pub type Keypoints = [Keypoint; NUM_KEYPOINTS];

/// The skeleton of one person. Always holds exactly [`NUM_KEYPOINTS`] keypoints in
/// [`KeypointKind`] order.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Pose {
    keypoints: Keypoints,
}

impl Pose {
    /// Build a pose from `(x, y, confidence)` triples.
    pub fn from_keypoints(values: &[(f32, f32, f32)]) -> Result<Self, Error> {
        if values.len() != NUM_KEYPOINTS {
            return Err(Error::KeypointCount {
                expected: NUM_KEYPOINTS,
                got: values.len(),
            });
        }
        let keypoints = KeypointKind::ALL
            .iter()
            .zip(values)
            .map(|(&kind, &(x, y, score))| Keypoint::new(kind, x, y, score))
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_vec(keypoints)
    }

    /// Build a pose from a flat `x0, y0, c0, x1, y1, c1, ...` buffer.
    pub fn from_flat(values: &[f32]) -> Result<Self, Error> {
        if values.len() % VALUES_PER_KEYPOINT != 0 {
            return Err(Error::FlatLength(values.len(), VALUES_PER_KEYPOINT));
        }
        let view = ArrayView2::from_shape(
            (values.len() / VALUES_PER_KEYPOINT, VALUES_PER_KEYPOINT),
            values,
        )
        .map_err(|_| Error::FlatLength(values.len(), VALUES_PER_KEYPOINT))?;
        Self::try_from(view)
    }

    fn from_vec(keypoints: Vec<Keypoint>) -> Result<Self, Error> {
        let got = keypoints.len();
        let keypoints = Keypoints::try_from(keypoints).map_err(|_| Error::KeypointCount {
            expected: NUM_KEYPOINTS,
            got,
        })?;
        Ok(Self { keypoints })
    }

    #[inline]
    pub fn keypoint(&self, kind: KeypointKind) -> &Keypoint {
        &self.keypoints[kind.idx()]
    }

    /// Look up a keypoint by raw index, failing for indices outside `0..NUM_KEYPOINTS`.
    pub fn get(&self, idx: usize) -> Result<&Keypoint, Error> {
        KeypointKind::from_idx(idx).map(|kind| self.keypoint(kind))
    }

    pub fn keypoints(&self) -> &Keypoints {
        &self.keypoints
    }

    /// The keypoint's position if it is visible at `threshold`.
    pub fn visible(&self, kind: KeypointKind, threshold: f32) -> Option<Point> {
        let keypoint = self.keypoint(kind);
        if keypoint.is_visible(threshold) {
            Some(keypoint.point)
        } else {
            None
        }
    }

    /// Number of keypoints strictly above `threshold`.
    pub fn count_visible(&self, threshold: f32) -> usize {
        self.keypoints
            .iter()
            .filter(|keypoint| keypoint.is_visible(threshold))
            .count()
    }
}

impl Index<KeypointKind> for Pose {
    type Output = Keypoint;

    fn index(&self, kind: KeypointKind) -> &Self::Output {
        self.keypoint(kind)
    }
}

/// Rows are keypoints, columns are `x, y, confidence`.
impl TryFrom<ArrayView2<'_, f32>> for Pose {
    type Error = Error;

    fn try_from(view: ArrayView2<'_, f32>) -> Result<Self, Self::Error> {
        let (rows, cols) = view.dim();
        if rows != NUM_KEYPOINTS {
            return Err(Error::KeypointCount {
                expected: NUM_KEYPOINTS,
                got: rows,
            });
        }
        if cols != VALUES_PER_KEYPOINT {
            return Err(Error::KeypointShape {
                expected: VALUES_PER_KEYPOINT,
                got: cols,
            });
        }
        let keypoints = view
            .axis_iter(Axis(0))
            .zip(KeypointKind::ALL.iter())
            .map(|(row, &kind)| Keypoint::new(kind, row[0], row[1], row[2]))
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_vec(keypoints)
    }
}

/// Convert a `(n, 17, 3)` batch into one pose per person.
pub fn poses_from_array(batch: ArrayView3<'_, f32>) -> Result<Vec<Pose>, Error> {
    let (_, keypoints, values) = batch.dim();
    if keypoints != NUM_KEYPOINTS || values != VALUES_PER_KEYPOINT {
        return Err(Error::BatchShape {
            expected_keypoints: NUM_KEYPOINTS,
            expected_values: VALUES_PER_KEYPOINT,
            got: batch.shape().to_vec(),
        });
    }
    batch.axis_iter(Axis(0)).map(Pose::try_from).collect()
}

/// A detected person as produced upstream by an inference step.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Detection {
    /// `x1, y1, x2, y2` in pixels.
    pub bbox: [f32; 4],
    pub score: f32,
    pub pose: Pose,
}

pub mod constants {
    use crate::pose::KeypointKind::{self, *};

    /// Bilateral keypoint pairs, left first.
    pub const PAIRED: [(KeypointKind, KeypointKind); 8] = [
        (LeftEye, RightEye),
        (LeftEar, RightEar),
        (LeftShoulder, RightShoulder),
        (LeftElbow, RightElbow),
        (LeftWrist, RightWrist),
        (LeftHip, RightHip),
        (LeftKnee, RightKnee),
        (LeftAnkle, RightAnkle),
    ];
}
