use std::io;
use std::path::Path;

use async_trait::async_trait;

/// Shell-out boundary to the external media transcoder binary.
#[async_trait]
pub trait MediaTranscoder: Send + Sync {
    /// Strip the video track from `video_path` and write a mono, 16 kHz,
    /// 16-bit PCM WAV file to `audio_path`. Overwrites `audio_path` if it
    /// already exists; never touches the source file.
    async fn extract_audio(
        &self,
        video_path: &Path,
        audio_path: &Path,
    ) -> Result<(), TranscoderError>;

    /// Re-encode an uploaded container into the canonical MP4 the rest of
    /// the pipeline expects (H.264, AAC, 30 fps, faststart, sane
    /// timestamps).
    async fn normalize_video(
        &self,
        input_path: &Path,
        output_path: &Path,
    ) -> Result<(), TranscoderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TranscoderError {
    #[error("transcoder binary failed to start: {0}")]
    Spawn(#[from] io::Error),
    #[error("transcoder exited with failure: {0}")]
    CommandFailed(String),
}
