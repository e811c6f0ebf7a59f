use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::application::ports::{
    MediaTranscoder, TranscoderError, TranscriptionEngine, TranscriptionError,
};
use crate::application::RetryPolicy;
use crate::domain::CaptionSegment;

/// Orchestrates the video-to-captions leg of the pipeline: extract a
/// temporary WAV, submit it for transcription with bounded retry, and
/// remove the WAV no matter how the attempt sequence ends.
pub struct CaptionService<M>
where
    M: MediaTranscoder,
{
    transcoder: Arc<M>,
    engine: Arc<dyn TranscriptionEngine>,
    retry: RetryPolicy,
    work_dir: PathBuf,
}

impl<M> CaptionService<M>
where
    M: MediaTranscoder,
{
    pub fn new(
        transcoder: Arc<M>,
        engine: Arc<dyn TranscriptionEngine>,
        retry: RetryPolicy,
        work_dir: PathBuf,
    ) -> Self {
        Self {
            transcoder,
            engine,
            retry,
            work_dir,
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn generate_captions(
        &self,
        video_path: &Path,
    ) -> Result<Vec<CaptionSegment>, CaptionError> {
        if !tokio::fs::try_exists(video_path).await.unwrap_or(false) {
            return Err(CaptionError::VideoNotFound(video_path.to_path_buf()));
        }

        // Time-based suffix is enough to keep concurrent requests in this
        // process off each other's files.
        let audio_path = self.work_dir.join(format!(
            "audio-{}.wav",
            chrono::Utc::now().timestamp_millis()
        ));

        let result = self.extract_and_transcribe(video_path, &audio_path).await;

        // The WAV goes away on success and on failure alike; a failed
        // removal is logged and never masks the primary outcome.
        if let Err(e) = tokio::fs::remove_file(&audio_path).await {
            if e.kind() != io::ErrorKind::NotFound {
                tracing::warn!(
                    path = %audio_path.display(),
                    error = %e,
                    "Failed to remove temporary audio file"
                );
            }
        }

        result
    }

    async fn extract_and_transcribe(
        &self,
        video_path: &Path,
        audio_path: &Path,
    ) -> Result<Vec<CaptionSegment>, CaptionError> {
        self.transcoder.extract_audio(video_path, audio_path).await?;

        let audio = tokio::fs::read(audio_path)
            .await
            .map_err(CaptionError::AudioRead)?;
        tracing::debug!(bytes = audio.len(), "Submitting extracted audio for transcription");

        let mut attempt: u32 = 1;
        loop {
            match self.engine.transcribe(&audio).await {
                Ok(segments) => {
                    tracing::info!(
                        segments = segments.len(),
                        attempt,
                        "Transcription completed"
                    );
                    return Ok(segments);
                }
                Err(e) if e.is_retryable() && self.retry.allows_retry_after(attempt) => {
                    tracing::warn!(error = %e, attempt, "Transcription attempt failed, retrying");
                    tokio::time::sleep(self.retry.delay).await;
                    attempt += 1;
                }
                Err(e) => {
                    tracing::error!(error = %e, attempt, "Transcription failed");
                    return Err(CaptionError::Transcription(e));
                }
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CaptionError {
    #[error("video file not found: {}", .0.display())]
    VideoNotFound(PathBuf),
    #[error("audio extraction failed: {0}")]
    Extraction(#[from] TranscoderError),
    #[error("reading extracted audio failed: {0}")]
    AudioRead(io::Error),
    #[error("transcription failed: {0}")]
    Transcription(#[from] TranscriptionError),
}
