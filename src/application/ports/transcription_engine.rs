use async_trait::async_trait;

use crate::domain::CaptionSegment;

/// Hosted speech-to-text boundary. Implementations submit extracted WAV
/// audio and normalize whatever the provider returns into ordered caption
/// segments with offsets in seconds.
#[async_trait]
pub trait TranscriptionEngine: Send + Sync {
    async fn transcribe(
        &self,
        audio_data: &[u8],
    ) -> Result<Vec<CaptionSegment>, TranscriptionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("api request failed with status {status}: {body}")]
    ApiStatus { status: u16, body: String },
    #[error("provider reported the transcription job as failed: {0}")]
    JobFailed(String),
    #[error("malformed provider response: {0}")]
    InvalidResponse(String),
    #[error("missing credential: {0}")]
    MissingCredential(String),
}

impl TranscriptionError {
    /// Transport and gateway failures may succeed on a later attempt. A
    /// job the provider itself marked failed will not, and resending the
    /// same bytes cannot fix a response-shape mismatch.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::ApiStatus { .. })
    }
}
