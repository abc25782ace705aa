#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("expected {expected} keypoints, got {got}")]
    KeypointCount { expected: usize, got: usize },

    #[error("expected {expected} values per keypoint, got {got}")]
    KeypointShape { expected: usize, got: usize },

    #[error("expected a batch of shape (n, {expected_keypoints}, {expected_values}), got {got:?}")]
    BatchShape {
        expected_keypoints: usize,
        expected_values: usize,
        got: Vec<usize>,
    },

    #[error("flat keypoint buffer of length {0} is not a multiple of {1}")]
    FlatLength(usize, usize),

    #[error("failed to convert usize value to keypoint kind: {0}")]
    ConvertUSizeToKeypointKind(usize),

    #[error("unknown keypoint name: {0}")]
    ParseKeypointKind(String),

    #[error("unknown joint name: {0}")]
    ParseJoint(String),

    #[error("failed to construct NotNan from f32: {1}")]
    ConstructNotNan(#[source] ordered_float::FloatIsNan, f32),

    #[error("expected a finite value, got {0}")]
    NonFinite(f32),

    #[error("{name} threshold must lie in [0, 1], got {value}")]
    InvalidThreshold { name: &'static str, value: f32 },

    #[error("failed to parse value {1:?} as f32")]
    ParseValue(#[source] std::num::ParseFloatError, String),

    #[error("expected {0} or {1} values per record, got {2}")]
    RecordLength(usize, usize, usize),

    #[error("failed to read input")]
    ReadInput(#[source] std::io::Error),

    #[error("invalid record on line {line}")]
    Line {
        line: usize,
        #[source]
        source: Box<Error>,
    },
}
