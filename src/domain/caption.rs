use serde::{Deserialize, Serialize};

/// One timed span of transcript text. Offsets are seconds from the start
/// of the source video, regardless of the unit the provider reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionSegment {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

impl CaptionSegment {
    pub fn new(
        start: f64,
        end: f64,
        text: impl Into<String>,
    ) -> Result<Self, CaptionTimingError> {
        if start < 0.0 || !start.is_finite() {
            return Err(CaptionTimingError::NegativeStart(start));
        }
        if !(end > start) {
            return Err(CaptionTimingError::EndBeforeStart { start, end });
        }
        Ok(Self {
            start,
            end,
            text: text.into(),
        })
    }

    /// Build a segment from provider timestamps expressed in milliseconds.
    pub fn from_millis(
        start_ms: u64,
        end_ms: u64,
        text: impl Into<String>,
    ) -> Result<Self, CaptionTimingError> {
        Self::new(start_ms as f64 / 1000.0, end_ms as f64 / 1000.0, text)
    }

    /// Revalidate a segment that arrived over the wire.
    pub fn validate(&self) -> Result<(), CaptionTimingError> {
        Self::new(self.start, self.end, "").map(|_| ())
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum CaptionTimingError {
    #[error("segment start offset {0} is negative or not a number")]
    NegativeStart(f64),
    #[error("segment ends at {end}s, at or before its start at {start}s")]
    EndBeforeStart { start: f64, end: f64 },
}
