use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::domain::{CaptionSegment, CaptionStyle};

/// Inputs for one composition pass. The engine runs out of process and
/// reaches the source video through `video_url`, never a local path.
#[derive(Debug, Clone)]
pub struct RenderJob {
    pub video_url: String,
    pub captions: Vec<CaptionSegment>,
    pub style: CaptionStyle,
}

/// External composition-rendering engine boundary.
#[async_trait]
pub trait RenderEngine: Send + Sync {
    /// Render the captioned composition to `output_path`. Implementations
    /// own bundle preparation and composition resolution.
    async fn render(&self, job: &RenderJob, output_path: &Path) -> Result<(), RenderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("bundling the composition project failed: {0}")]
    BundleFailed(String),
    #[error("composition '{0}' not found in bundle")]
    CompositionNotFound(String),
    #[error("render engine failed: {0}")]
    EngineFailed(String),
    #[error("render finished but produced no output at {}", .0.display())]
    OutputMissing(PathBuf),
    #[error("render finished but the output at {} is empty", .0.display())]
    OutputEmpty(PathBuf),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}
