//! Application configuration value object

use serde::{Deserialize, Serialize};

use crate::domain::take::Credits;

pub const DEFAULT_SCRIPT_LOCATION: &str = "./";
pub const DEFAULT_RECORD_LOCATION: &str = "~/obs-inbox";
pub const DEFAULT_FFMPEG_PATH: &str = "ffmpeg";
pub const DEFAULT_OBS_ADDRESS: &str = "localhost:4444";
pub const DEFAULT_SETTLE_DELAY_MS: u64 = 500;

/// OBS connection settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObsConfig {
    pub address: Option<String>,
    pub password: Option<String>,
}

/// Credits embedded into every accepted take.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetadataConfig {
    pub author: Option<String>,
    pub copyright: Option<String>,
}

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub script_location: Option<String>,
    pub record_location: Option<String>,
    pub ffmpeg_path: Option<String>,
    pub settle_delay_ms: Option<u64>,
    pub obs: Option<ObsConfig>,
    pub metadata: Option<MetadataConfig>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            script_location: Some(DEFAULT_SCRIPT_LOCATION.to_string()),
            record_location: Some(DEFAULT_RECORD_LOCATION.to_string()),
            ffmpeg_path: Some(DEFAULT_FFMPEG_PATH.to_string()),
            settle_delay_ms: Some(DEFAULT_SETTLE_DELAY_MS),
            obs: Some(ObsConfig {
                address: Some(DEFAULT_OBS_ADDRESS.to_string()),
                password: None,
            }),
            metadata: None,
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            script_location: other.script_location.or(self.script_location),
            record_location: other.record_location.or(self.record_location),
            ffmpeg_path: other.ffmpeg_path.or(self.ffmpeg_path),
            settle_delay_ms: other.settle_delay_ms.or(self.settle_delay_ms),
            obs: Self::merge_obs_config(self.obs, other.obs),
            metadata: Self::merge_metadata_config(self.metadata, other.metadata),
        }
    }

    fn merge_obs_config(base: Option<ObsConfig>, other: Option<ObsConfig>) -> Option<ObsConfig> {
        match (base, other) {
            (None, None) => None,
            (Some(b), None) => Some(b),
            (None, Some(o)) => Some(o),
            (Some(b), Some(o)) => Some(ObsConfig {
                address: o.address.or(b.address),
                password: o.password.or(b.password),
            }),
        }
    }

    fn merge_metadata_config(
        base: Option<MetadataConfig>,
        other: Option<MetadataConfig>,
    ) -> Option<MetadataConfig> {
        match (base, other) {
            (None, None) => None,
            (Some(b), None) => Some(b),
            (None, Some(o)) => Some(o),
            (Some(b), Some(o)) => Some(MetadataConfig {
                author: o.author.or(b.author),
                copyright: o.copyright.or(b.copyright),
            }),
        }
    }

    pub fn script_location_or_default(&self) -> &str {
        self.script_location
            .as_deref()
            .unwrap_or(DEFAULT_SCRIPT_LOCATION)
    }

    pub fn record_location_or_default(&self) -> &str {
        self.record_location
            .as_deref()
            .unwrap_or(DEFAULT_RECORD_LOCATION)
    }

    pub fn ffmpeg_path_or_default(&self) -> &str {
        self.ffmpeg_path.as_deref().unwrap_or(DEFAULT_FFMPEG_PATH)
    }

    pub fn settle_delay_or_default(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.settle_delay_ms.unwrap_or(DEFAULT_SETTLE_DELAY_MS))
    }

    pub fn obs_address_or_default(&self) -> &str {
        self.obs
            .as_ref()
            .and_then(|o| o.address.as_deref())
            .unwrap_or(DEFAULT_OBS_ADDRESS)
    }

    /// OBS password, treating an empty string as no password
    pub fn obs_password(&self) -> Option<&str> {
        self.obs
            .as_ref()
            .and_then(|o| o.password.as_deref())
            .filter(|p| !p.is_empty())
    }

    /// Author/copyright credits, possibly absent
    pub fn credits(&self) -> Credits {
        let metadata = self.metadata.clone().unwrap_or_default();
        Credits {
            author: metadata.author.filter(|s| !s.is_empty()),
            copyright: metadata.copyright.filter(|s| !s.is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_values() {
        let config = AppConfig::defaults();
        assert_eq!(config.script_location, Some("./".to_string()));
        assert_eq!(config.record_location, Some("~/obs-inbox".to_string()));
        assert_eq!(config.ffmpeg_path, Some("ffmpeg".to_string()));
        assert_eq!(config.settle_delay_ms, Some(500));
        assert_eq!(config.obs_address_or_default(), "localhost:4444");
        assert!(config.obs_password().is_none());
    }

    #[test]
    fn empty_has_no_values() {
        let config = AppConfig::empty();
        assert!(config.script_location.is_none());
        assert!(config.obs.is_none());
        assert!(config.metadata.is_none());
    }

    #[test]
    fn merge_overrides_with_other() {
        let base = AppConfig::defaults();
        let other = AppConfig {
            record_location: Some("/srv/takes".to_string()),
            ..Default::default()
        };

        let merged = base.merge(other);

        assert_eq!(merged.record_location_or_default(), "/srv/takes");
        assert_eq!(merged.script_location_or_default(), "./"); // Kept from base
    }

    #[test]
    fn merge_preserves_base_when_other_is_none() {
        let base = AppConfig {
            ffmpeg_path: Some("/opt/ffmpeg".to_string()),
            settle_delay_ms: Some(750),
            ..Default::default()
        };

        let merged = base.merge(AppConfig::empty());

        assert_eq!(merged.ffmpeg_path_or_default(), "/opt/ffmpeg");
        assert_eq!(merged.settle_delay_or_default().as_millis(), 750);
    }

    #[test]
    fn merge_obs_fields_independently() {
        let base = AppConfig {
            obs: Some(ObsConfig {
                address: Some("studio:4444".to_string()),
                password: Some("secret".to_string()),
            }),
            ..Default::default()
        };
        let other = AppConfig {
            obs: Some(ObsConfig {
                address: Some("localhost:4455".to_string()),
                password: None,
            }),
            ..Default::default()
        };

        let merged = base.merge(other);

        assert_eq!(merged.obs_address_or_default(), "localhost:4455");
        assert_eq!(merged.obs_password(), Some("secret"));
    }

    #[test]
    fn empty_password_is_none() {
        let config = AppConfig {
            obs: Some(ObsConfig {
                address: None,
                password: Some(String::new()),
            }),
            ..Default::default()
        };
        assert!(config.obs_password().is_none());
    }

    #[test]
    fn credits_from_metadata() {
        let config = AppConfig {
            metadata: Some(MetadataConfig {
                author: Some("Ada".to_string()),
                copyright: Some(String::new()),
            }),
            ..Default::default()
        };
        let credits = config.credits();
        assert_eq!(credits.author.as_deref(), Some("Ada"));
        assert!(credits.copyright.is_none());
    }

    #[test]
    fn accessors_fall_back_on_empty_config() {
        let config = AppConfig::empty();
        assert_eq!(config.script_location_or_default(), "./");
        assert_eq!(config.record_location_or_default(), "~/obs-inbox");
        assert_eq!(config.settle_delay_or_default().as_millis(), 500);
        assert_eq!(config.credits(), Credits::default());
    }
}
