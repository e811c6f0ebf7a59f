use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::application::ports::{TranscriptionEngine, TranscriptionError};
use crate::domain::CaptionSegment;

/// Test double returning a scripted sequence of outcomes, then a fixed
/// fallback result once the script runs dry. Counts invocations so tests
/// can assert on attempt behavior.
pub struct MockTranscriptionEngine {
    script: Mutex<VecDeque<Result<Vec<CaptionSegment>, TranscriptionError>>>,
    fallback: Vec<CaptionSegment>,
    calls: AtomicU32,
}

impl MockTranscriptionEngine {
    pub fn with_script(
        outcomes: Vec<Result<Vec<CaptionSegment>, TranscriptionError>>,
        fallback: Vec<CaptionSegment>,
    ) -> Self {
        Self {
            script: Mutex::new(outcomes.into()),
            fallback,
            calls: AtomicU32::new(0),
        }
    }

    /// Always succeeds with the given segments.
    pub fn succeeding(segments: Vec<CaptionSegment>) -> Self {
        Self::with_script(Vec::new(), segments)
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TranscriptionEngine for MockTranscriptionEngine {
    async fn transcribe(
        &self,
        _audio_data: &[u8],
    ) -> Result<Vec<CaptionSegment>, TranscriptionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let scripted = self
            .script
            .lock()
            .expect("mock script lock poisoned")
            .pop_front();
        match scripted {
            Some(outcome) => outcome,
            None => Ok(self.fallback.clone()),
        }
    }
}
