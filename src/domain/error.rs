//! Domain error types

use thiserror::Error;

/// Errors from reading, writing or validating the take-prompter config
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read take-prompter config: {0}")]
    ReadError(String),

    #[error("Malformed take-prompter config: {0}")]
    ParseError(String),

    #[error("Failed to write take-prompter config: {0}")]
    WriteError(String),

    #[error("Invalid value for config key '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("A take-prompter config already exists at {0}; edit it or use `config set`")]
    AlreadyExists(String),
}
