use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::application::ports::{RenderEngine, RenderError, RenderJob};

enum Behavior {
    Succeed,
    FailLeavingPartialOutput,
    SucceedWithoutOutput,
}

/// Test double standing in for the external render engine. Records every
/// job it receives; the configured behavior decides what lands on disk.
pub struct MockRenderEngine {
    behavior: Behavior,
    jobs: Mutex<Vec<RenderJob>>,
}

impl MockRenderEngine {
    pub fn succeeding() -> Self {
        Self {
            behavior: Behavior::Succeed,
            jobs: Mutex::new(Vec::new()),
        }
    }

    /// Writes partial bytes, then reports failure. The caller is
    /// responsible for removing the debris.
    pub fn failing_with_partial_output() -> Self {
        Self {
            behavior: Behavior::FailLeavingPartialOutput,
            jobs: Mutex::new(Vec::new()),
        }
    }

    /// Claims success without writing anything.
    pub fn succeeding_without_output() -> Self {
        Self {
            behavior: Behavior::SucceedWithoutOutput,
            jobs: Mutex::new(Vec::new()),
        }
    }

    pub fn jobs(&self) -> Vec<RenderJob> {
        self.jobs.lock().expect("mock jobs lock poisoned").clone()
    }
}

#[async_trait]
impl RenderEngine for MockRenderEngine {
    async fn render(&self, job: &RenderJob, output_path: &Path) -> Result<(), RenderError> {
        self.jobs
            .lock()
            .expect("mock jobs lock poisoned")
            .push(job.clone());

        match self.behavior {
            Behavior::Succeed => {
                tokio::fs::write(output_path, b"mock rendered mp4 bytes").await?;
                Ok(())
            }
            Behavior::FailLeavingPartialOutput => {
                tokio::fs::write(output_path, b"partial").await?;
                Err(RenderError::EngineFailed("mock render failure".to_string()))
            }
            Behavior::SucceedWithoutOutput => Ok(()),
        }
    }
}
