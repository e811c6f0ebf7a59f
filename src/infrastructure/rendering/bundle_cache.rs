use std::future::Future;
use std::path::PathBuf;

use tokio::sync::OnceCell;

use crate::application::ports::RenderError;

/// Process-wide memo for the engine's bundle artifact. At most one build
/// runs at a time; concurrent callers wait for that build's outcome. A
/// successful build is shared by every later call; a failed build leaves
/// the cell empty so the next caller attempts a fresh build instead of
/// reusing poisoned state.
#[derive(Default)]
pub struct BundleCache {
    cell: OnceCell<PathBuf>,
}

impl BundleCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get_or_build<F, Fut>(&self, build: F) -> Result<&PathBuf, RenderError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<PathBuf, RenderError>>,
    {
        self.cell.get_or_try_init(build).await
    }

    /// Whether a bundle has been built and memoized.
    pub fn is_built(&self) -> bool {
        self.cell.initialized()
    }
}
