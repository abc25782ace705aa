use crate::error::Error;

pub const DEFAULT_CONFIDENCE: f32 = 0.5;
pub const DEFAULT_HEAD_TURN_CONFIDENCE: f32 = 0.3;
pub const DEFAULT_HIGH_CONFIDENCE: f32 = 0.8;

/// Confidence thresholds used when analyzing a pose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// Keypoints at or below this score are treated as not visible.
    pub confidence: f32,
    /// Minimum eye score for the head-turn heuristic.
    pub head_turn_confidence: f32,
    /// Score above which a keypoint counts as high confidence in visibility summaries.
    pub high_confidence: f32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            confidence: DEFAULT_CONFIDENCE,
            head_turn_confidence: DEFAULT_HEAD_TURN_CONFIDENCE,
            high_confidence: DEFAULT_HIGH_CONFIDENCE,
        }
    }
}

impl Thresholds {
    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = confidence;
        self
    }

    pub fn with_head_turn_confidence(mut self, head_turn_confidence: f32) -> Self {
        self.head_turn_confidence = head_turn_confidence;
        self
    }

    pub fn with_high_confidence(mut self, high_confidence: f32) -> Self {
        self.high_confidence = high_confidence;
        self
    }

    /// Check every threshold lies in `[0, 1]`.
    pub fn validate(self) -> Result<Self, Error> {
        check("confidence", self.confidence)?;
        check("head turn confidence", self.head_turn_confidence)?;
        check("high confidence", self.high_confidence)?;
        Ok(self)
    }
}

fn check(name: &'static str, value: f32) -> Result<(), Error> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(Error::InvalidThreshold { name, value })
    }
}
