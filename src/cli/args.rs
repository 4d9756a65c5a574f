//! CLI argument definitions using Clap

use clap::{Parser, Subcommand};

use crate::domain::config::{AppConfig, MetadataConfig, ObsConfig};

/// take-prompter - teleprompter-driven OBS recording sessions
#[derive(Parser, Debug)]
#[command(name = "take-prompter")]
#[command(version)]
#[command(about = "Record a markdown script block by block through OBS")]
#[command(long_about = None)]
pub struct Cli {
    /// Directory containing the markdown scripts
    #[arg(short = 's', long = "scripts", value_name = "DIR", env = "SCRIPT_LOCATION")]
    pub script_location: Option<String>,

    /// Root directory for recordings (one sub-folder per script)
    #[arg(short = 'o', long = "output", value_name = "DIR", env = "RECORD_LOCATION")]
    pub record_location: Option<String>,

    /// obs-websocket address (host:port or ws:// URL)
    #[arg(long, value_name = "ADDR", env = "OBS_ADDRESS")]
    pub obs_address: Option<String>,

    /// obs-websocket password
    #[arg(long, value_name = "PASSWORD", env = "OBS_PASSWORD", hide_env_values = true)]
    pub obs_password: Option<String>,

    /// FFmpeg binary used to tag accepted takes
    #[arg(long = "ffmpeg", value_name = "PATH", env = "FFMPEG_PATH")]
    pub ffmpeg_path: Option<String>,

    /// Author written into every accepted take
    #[arg(long, value_name = "NAME", env = "METADATA_AUTHOR")]
    pub author: Option<String>,

    /// Copyright written into every accepted take
    #[arg(long, value_name = "TEXT", env = "METADATA_COPYRIGHT")]
    pub copyright: Option<String>,

    /// Script to record, skipping the selection prompt
    #[arg(long, value_name = "NAME")]
    pub script: Option<String>,

    /// Print debug logs to stderr
    #[arg(short = 'v', long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Settings given on the command line or through the environment
    pub fn to_config(&self) -> AppConfig {
        let obs = (self.obs_address.is_some() || self.obs_password.is_some()).then(|| ObsConfig {
            address: self.obs_address.clone(),
            password: self.obs_password.clone(),
        });
        let metadata = (self.author.is_some() || self.copyright.is_some()).then(|| MetadataConfig {
            author: self.author.clone(),
            copyright: self.copyright.clone(),
        });

        AppConfig {
            script_location: self.script_location.clone(),
            record_location: self.record_location.clone(),
            ffmpeg_path: self.ffmpeg_path.clone(),
            settle_delay_ms: None,
            obs,
            metadata,
        }
    }
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// List the scripts available for recording
    Scripts,
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "script_location",
    "record_location",
    "ffmpeg_path",
    "settle_delay_ms",
    "obs.address",
    "obs.password",
    "metadata.author",
    "metadata.copyright",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}
