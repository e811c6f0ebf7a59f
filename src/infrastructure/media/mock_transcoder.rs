use std::path::Path;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;

use crate::application::ports::{MediaTranscoder, TranscoderError};

/// Test double that fakes transcoding with plain file writes: extraction
/// drops placeholder WAV bytes at the requested path, normalization
/// copies the input through unchanged.
#[derive(Default)]
pub struct MockTranscoder {
    extractions: AtomicU32,
    normalizations: AtomicU32,
}

impl MockTranscoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extractions(&self) -> u32 {
        self.extractions.load(Ordering::SeqCst)
    }

    pub fn normalizations(&self) -> u32 {
        self.normalizations.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MediaTranscoder for MockTranscoder {
    async fn extract_audio(
        &self,
        _video_path: &Path,
        audio_path: &Path,
    ) -> Result<(), TranscoderError> {
        self.extractions.fetch_add(1, Ordering::SeqCst);
        tokio::fs::write(audio_path, b"RIFF mock wav payload").await?;
        Ok(())
    }

    async fn normalize_video(
        &self,
        input_path: &Path,
        output_path: &Path,
    ) -> Result<(), TranscoderError> {
        self.normalizations.fetch_add(1, Ordering::SeqCst);
        tokio::fs::copy(input_path, output_path).await?;
        Ok(())
    }
}
