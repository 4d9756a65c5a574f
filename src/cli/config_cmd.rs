//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::config::{AppConfig, MetadataConfig, ObsConfig};
use crate::domain::error::ConfigError;

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

const NOT_SET: &str = "(not set)";

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

fn check_key(key: &str) -> Result<(), ConfigError> {
    if is_valid_config_key(key) {
        return Ok(());
    }
    Err(ConfigError::ValidationError {
        key: key.to_string(),
        message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
    })
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;
    let mut config = store.load().await?;
    apply_value(&mut config, key, value)?;
    store.save(&config).await?;

    let shown = if key == "obs.password" {
        mask_secret(value)
    } else {
        value.to_string()
    };
    presenter.success(&format!("{} = {}", key, shown));
    Ok(())
}

/// Write `value` into the field named by `key`
fn apply_value(config: &mut AppConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    let value = value.to_string();
    match key {
        "script_location" => config.script_location = Some(value),
        "record_location" => config.record_location = Some(value),
        "ffmpeg_path" => config.ffmpeg_path = Some(value),
        "settle_delay_ms" => {
            let millis = value
                .parse::<u64>()
                .map_err(|_| ConfigError::ValidationError {
                    key: key.to_string(),
                    message: "Value must be a whole number of milliseconds".to_string(),
                })?;
            config.settle_delay_ms = Some(millis);
        }
        "obs.address" => config.obs.get_or_insert_with(ObsConfig::default).address = Some(value),
        "obs.password" => config.obs.get_or_insert_with(ObsConfig::default).password = Some(value),
        "metadata.author" => {
            config
                .metadata
                .get_or_insert_with(MetadataConfig::default)
                .author = Some(value)
        }
        "metadata.copyright" => {
            config
                .metadata
                .get_or_insert_with(MetadataConfig::default)
                .copyright = Some(value)
        }
        _ => check_key(key)?,
    }
    Ok(())
}

/// Display value for `key`; the password is masked
fn read_value(config: &AppConfig, key: &str) -> Option<String> {
    let obs = config.obs.as_ref();
    let metadata = config.metadata.as_ref();
    match key {
        "script_location" => config.script_location.clone(),
        "record_location" => config.record_location.clone(),
        "ffmpeg_path" => config.ffmpeg_path.clone(),
        "settle_delay_ms" => config.settle_delay_ms.map(|ms| ms.to_string()),
        "obs.address" => obs.and_then(|o| o.address.clone()),
        "obs.password" => obs.and_then(|o| o.password.as_deref()).map(mask_secret),
        "metadata.author" => metadata.and_then(|m| m.author.clone()),
        "metadata.copyright" => metadata.and_then(|m| m.copyright.clone()),
        _ => None,
    }
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;
    let config = store.load().await?;

    match read_value(&config, key) {
        Some(v) => presenter.output(&v),
        None => presenter.output(NOT_SET),
    }

    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;

    for key in VALID_CONFIG_KEYS {
        presenter.key_value(
            key,
            read_value(&config, key).as_deref().unwrap_or(NOT_SET),
        );
    }

    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

/// Mask a secret for display (show first 2 and last 2 chars)
fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 6 {
        "*".repeat(chars.len())
    } else {
        let head: String = chars[..2].iter().collect();
        let tail: String = chars[chars.len() - 2..].iter().collect();
        format!("{}...{}", head, tail)
    }
}
