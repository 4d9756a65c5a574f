//! Configuration value objects

mod app_config;

pub use app_config::{
    AppConfig, MetadataConfig, ObsConfig, DEFAULT_FFMPEG_PATH, DEFAULT_OBS_ADDRESS,
    DEFAULT_RECORD_LOCATION, DEFAULT_SCRIPT_LOCATION, DEFAULT_SETTLE_DELAY_MS,
};
