//! Config store port

use async_trait::async_trait;
use std::path::PathBuf;

use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

/// Persistent layer of the config, between the defaults and env/CLI values
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Load the stored config; a missing file yields an empty config
    async fn load(&self) -> Result<AppConfig, ConfigError>;

    /// Overwrite the stored config
    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError>;

    fn path(&self) -> PathBuf;

    fn exists(&self) -> bool;

    /// Write the default OBS, scripts and ffmpeg settings.
    ///
    /// Fails with [`ConfigError::AlreadyExists`] rather than replacing a file.
    async fn init(&self) -> Result<(), ConfigError>;
}
