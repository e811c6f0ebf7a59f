use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::process::Command;

use crate::application::ports::{MediaTranscoder, TranscoderError};

/// Drives the ffmpeg binary for audio extraction and upload
/// normalization. The binary path comes from configuration and is probed
/// once at startup.
pub struct FfmpegTranscoder {
    binary: PathBuf,
}

impl FfmpegTranscoder {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Startup probe. An unusable binary is a fatal configuration error,
    /// caught before the server starts accepting work.
    pub async fn verify(&self) -> Result<(), TranscoderError> {
        let mut cmd = Command::new(&self.binary);
        cmd.arg("-version");
        run(cmd).await
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.binary);
        // Overwrite outputs and keep the banner out of stderr diagnostics.
        cmd.arg("-y").arg("-hide_banner");
        cmd
    }
}

#[async_trait]
impl MediaTranscoder for FfmpegTranscoder {
    async fn extract_audio(
        &self,
        video_path: &Path,
        audio_path: &Path,
    ) -> Result<(), TranscoderError> {
        tracing::debug!(
            video = %video_path.display(),
            audio = %audio_path.display(),
            "Extracting audio track"
        );

        let mut cmd = self.command();
        cmd.arg("-i")
            .arg(video_path)
            .arg("-vn")
            .args(["-acodec", "pcm_s16le"])
            .args(["-ar", "16000"])
            .args(["-ac", "1"])
            .args(["-f", "wav"])
            .arg(audio_path);

        run(cmd).await
    }

    async fn normalize_video(
        &self,
        input_path: &Path,
        output_path: &Path,
    ) -> Result<(), TranscoderError> {
        tracing::debug!(
            input = %input_path.display(),
            output = %output_path.display(),
            "Normalizing upload to canonical MP4"
        );

        let mut cmd = self.command();
        cmd.args(["-fflags", "+genpts"])
            .arg("-i")
            .arg(input_path)
            .args(["-c:v", "libx264"])
            .args(["-pix_fmt", "yuv420p"])
            .args(["-r", "30"])
            .args(["-c:a", "aac"])
            .args(["-movflags", "+faststart"])
            .arg(output_path);

        run(cmd).await
    }
}

async fn run(mut cmd: Command) -> Result<(), TranscoderError> {
    let output = cmd.output().await?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(TranscoderError::CommandFailed(stderr));
    }
    Ok(())
}
