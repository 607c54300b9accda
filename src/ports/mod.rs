// Ports - Interface definitions (contracts)

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::domain::errors::*;
use crate::domain::model::*;

/// Port for text-to-video generation backends
#[async_trait]
pub trait GenerationPort: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Submit a prompt and return the generated frames in playback order
    ///
    /// Transport failures, non-success responses and empty frame lists are
    /// all `DomainError::Backend`. Nothing is retried.
    async fn submit(&self, prompt: &str, params: &GenerationParams)
        -> Result<Vec<Frame>, DomainError>;
}

/// Port for writing frames to a video file
#[async_trait]
pub trait EncodePort: Send + Sync {
    /// Encode frames at `fps` into `output_path` and return the written path
    ///
    /// Fails with `DomainError::Encoding` for an empty frame list or frames
    /// of differing dimensions. No file is left behind on failure.
    async fn encode(
        &self,
        frames: &[Frame],
        output_path: &Path,
        fps: u32,
    ) -> Result<PathBuf, DomainError>;
}

/// Port for persisting scripts
#[async_trait]
pub trait ScriptStorePort: Send + Sync {
    /// Read and parse a script file
    async fn load(&self, path: &Path) -> Result<Script, DomainError>;

    /// Serialize and write a script file
    async fn save(&self, script: &Script, path: &Path) -> Result<(), DomainError>;
}
