use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::process::Command;

use crate::application::ports::{RenderEngine, RenderError, RenderJob};

use super::bundle_cache::BundleCache;

/// The composition every render resolves against. Its absence from the
/// bundle is a configuration error, not a transient failure.
pub const CAPTIONED_COMPOSITION: &str = "CaptionedVideo";

/// Drives the external rendering engine's CLI through its bundle /
/// compositions / render protocol. The bundle artifact is built once per
/// process and reused by every render.
pub struct RemotionRenderer {
    binary: PathBuf,
    project_entry: PathBuf,
    bundle_dir: PathBuf,
    bundle: BundleCache,
}

impl RemotionRenderer {
    pub fn new(
        binary: impl Into<PathBuf>,
        project_entry: impl Into<PathBuf>,
        bundle_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            binary: binary.into(),
            project_entry: project_entry.into(),
            bundle_dir: bundle_dir.into(),
            bundle: BundleCache::new(),
        }
    }

    async fn build_bundle(&self) -> Result<PathBuf, RenderError> {
        tracing::info!(entry = %self.project_entry.display(), "Bundling composition project");

        let output = Command::new(&self.binary)
            .arg("bundle")
            .arg(&self.project_entry)
            .arg("--out-dir")
            .arg(&self.bundle_dir)
            .output()
            .await
            .map_err(|e| RenderError::BundleFailed(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(RenderError::BundleFailed(stderr));
        }

        tracing::info!(bundle = %self.bundle_dir.display(), "Composition project bundled");
        Ok(self.bundle_dir.clone())
    }

    /// The `compositions` subcommand prints one composition id per line.
    async fn resolve_composition(&self, bundle: &Path) -> Result<(), RenderError> {
        let output = Command::new(&self.binary)
            .arg("compositions")
            .arg(bundle)
            .output()
            .await
            .map_err(|e| RenderError::EngineFailed(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(RenderError::EngineFailed(stderr));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let listed = stdout
            .lines()
            .any(|line| line.trim() == CAPTIONED_COMPOSITION);
        if !listed {
            return Err(RenderError::CompositionNotFound(
                CAPTIONED_COMPOSITION.to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl RenderEngine for RemotionRenderer {
    async fn render(&self, job: &RenderJob, output_path: &Path) -> Result<(), RenderError> {
        let bundle = self.bundle.get_or_build(|| self.build_bundle()).await?;
        self.resolve_composition(bundle).await?;

        let props = serde_json::json!({
            "videoPath": job.video_url,
            "captions": job.captions,
            "style": job.style,
        });

        tracing::info!(
            video = %job.video_url,
            captions = job.captions.len(),
            style = %job.style,
            output = %output_path.display(),
            "Rendering captioned composition"
        );

        let output = Command::new(&self.binary)
            .arg("render")
            .arg(bundle)
            .arg(CAPTIONED_COMPOSITION)
            .arg(output_path)
            .args(["--codec", "h264"])
            .args(["--audio-codec", "aac"])
            .arg("--props")
            .arg(props.to_string())
            .output()
            .await
            .map_err(|e| RenderError::EngineFailed(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(RenderError::EngineFailed(stderr));
        }

        Ok(())
    }
}
