use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use uuid::Uuid;

use crate::application::ports::{RenderEngine, RenderError, RenderJob};
use crate::domain::{CaptionSegment, CaptionStyle, RenderedAsset, VideoAsset};

/// Orchestrates one render pass: adapt the local video reference into a
/// URL the sandboxed engine can reach, pick a unique output name, invoke
/// the engine, and guarantee no partial output survives a failure.
pub struct RenderService<R>
where
    R: RenderEngine,
{
    engine: Arc<R>,
    output_dir: PathBuf,
    base_url: String,
}

impl<R> RenderService<R>
where
    R: RenderEngine,
{
    pub fn new(engine: Arc<R>, output_dir: PathBuf, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            engine,
            output_dir,
            base_url,
        }
    }

    #[tracing::instrument(skip_all, fields(video = %video.url(), captions = captions.len(), style = %style))]
    pub async fn render(
        &self,
        video: &VideoAsset,
        captions: Vec<CaptionSegment>,
        style: CaptionStyle,
    ) -> Result<RenderedAsset, RenderError> {
        tokio::fs::create_dir_all(&self.output_dir).await?;

        // Every call gets its own output file, identical inputs included.
        let filename = format!("render-{}.mp4", Uuid::new_v4());
        let output_path = self.output_dir.join(&filename);

        let job = RenderJob {
            video_url: video.url().to_string(),
            captions,
            style,
        };

        let outcome = match self.engine.render(&job, &output_path).await {
            Ok(()) => self.check_output(&output_path).await,
            Err(e) => Err(e),
        };

        match outcome {
            Ok(()) => {
                let url = format!("{}/outputs/{}", self.base_url, filename);
                tracing::info!(output = %output_path.display(), "Render completed");
                Ok(RenderedAsset::new(output_path, url))
            }
            Err(e) => {
                // Failed renders must not leave partial output reachable.
                if let Err(rm) = tokio::fs::remove_file(&output_path).await {
                    if rm.kind() != io::ErrorKind::NotFound {
                        tracing::warn!(
                            path = %output_path.display(),
                            error = %rm,
                            "Failed to remove partial render output"
                        );
                    }
                }
                Err(e)
            }
        }
    }

    async fn check_output(&self, output_path: &PathBuf) -> Result<(), RenderError> {
        match tokio::fs::metadata(output_path).await {
            Ok(meta) if meta.len() > 0 => Ok(()),
            Ok(_) => Err(RenderError::OutputEmpty(output_path.clone())),
            Err(_) => Err(RenderError::OutputMissing(output_path.clone())),
        }
    }
}
