//! Script source, loader and renderer port interfaces

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::script::ParsedScript;

/// Script access errors
#[derive(Debug, Clone, Error)]
pub enum ScriptError {
    #[error("Failed to list scripts in {location}: {message}")]
    ListFailed { location: String, message: String },

    #[error("No scripts found in {0}")]
    NoScripts(String),

    #[error("Failed to read script {name}: {message}")]
    ReadFailed { name: String, message: String },
}

/// Port for the place scripts are stored
#[async_trait]
pub trait ScriptSource: Send + Sync {
    /// Names of the available scripts, sorted
    async fn list(&self) -> Result<Vec<String>, ScriptError>;

    /// Raw content of the script `name`
    async fn read(&self, name: &str) -> Result<String, ScriptError>;
}

/// Port for splitting raw script text into a title and blocks
pub trait ScriptLoader: Send + Sync {
    fn load(&self, raw: &str) -> ParsedScript;
}

/// Port for turning markdown into displayable text
pub trait Renderer: Send + Sync {
    fn render(&self, markdown: &str) -> String;
}
