use std::path::{Path, PathBuf};

/// A normalized source video held under the managed upload directory,
/// addressed both by local path and externally visible URL.
#[derive(Debug, Clone)]
pub struct VideoAsset {
    path: PathBuf,
    url: String,
}

impl VideoAsset {
    pub fn new(path: impl Into<PathBuf>, url: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            url: url.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn filename(&self) -> &str {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
    }
}

/// A captioned output video produced by the render engine. Never mutated
/// after creation; lifecycle ends on cleanup or external serving.
#[derive(Debug, Clone)]
pub struct RenderedAsset {
    path: PathBuf,
    url: String,
}

impl RenderedAsset {
    pub fn new(path: impl Into<PathBuf>, url: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            url: url.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn filename(&self) -> &str {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
    }
}
