//! Media tagger port interface

use std::path::Path;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::take::TakeMetadata;

/// Tagging errors
#[derive(Debug, Clone, Error)]
pub enum TaggingError {
    #[error("Tagger binary not found: {0}")]
    TaggerNotFound(String),

    #[error("Failed to run tagger: {0}")]
    SpawnFailed(String),

    #[error("Tagger exited with {status}: {message}")]
    ProcessFailed { status: String, message: String },

    #[error("Failed to replace {path} with the tagged file: {message}")]
    ReplaceFailed { path: String, message: String },
}

/// Port for writing metadata into a finished recording
#[async_trait]
pub trait MediaTagger: Send + Sync {
    /// Embed `metadata` into `file`, replacing it in place.
    async fn tag(&self, file: &Path, metadata: &TakeMetadata) -> Result<(), TaggingError>;
}
