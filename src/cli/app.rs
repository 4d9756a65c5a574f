//! Main app runner for recording sessions

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::application::ports::{ConfigStore, ScriptSource};
use crate::application::{RecordScriptUseCase, RecordingController, SessionCallbacks, SessionInput};
use crate::domain::config::AppConfig;
use crate::infrastructure::{
    FfmpegTagger, MarkdownScriptLoader, ObsWebSocketClient, ScriptDirectory, XdgConfigStore,
};

use super::chooser::TerminalChooser;
use super::presenter::Presenter;
use super::renderer::TerminalRenderer;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Load and merge configuration: defaults < file < env/cli.
///
/// `cli_config` already carries environment values, since clap reads the
/// same variables for flags that were not given.
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = match store.load().await {
        Ok(config) => config,
        Err(e) => {
            warn!("Ignoring config file {}: {}", store.path().display(), e);
            AppConfig::empty()
        }
    };

    AppConfig::defaults().merge(file_config).merge(cli_config)
}

/// Expand a leading `~` to the home directory
pub fn expand_home(path: &str) -> PathBuf {
    let rest = match path.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest.trim_start_matches('/'),
        _ => return PathBuf::from(path),
    };

    match dirs::home_dir() {
        Some(home) if rest.is_empty() => home,
        Some(home) => home.join(rest),
        None => PathBuf::from(path),
    }
}

/// Print the scripts available in the configured location
pub async fn list_scripts(config: &AppConfig) -> ExitCode {
    let presenter = Presenter::new();
    let scripts = ScriptDirectory::new(expand_home(config.script_location_or_default()));

    match scripts.list().await {
        Ok(names) => {
            for name in names {
                presenter.output(&name);
            }
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            presenter.error(&e.to_string());
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn session_callbacks(presenter: &Arc<Presenter>) -> SessionCallbacks {
    let screen = Arc::clone(presenter);
    let recording = Arc::clone(presenter);
    let tagging = Arc::clone(presenter);
    let saved = Arc::clone(presenter);
    let discarded = Arc::clone(presenter);

    SessionCallbacks {
        on_screen: Some(Box::new(move |text: &str| screen.screen(text))),
        on_recording_start: Some(Box::new(move || recording.recording_banner())),
        on_tagging_start: Some(Box::new(move |path: &Path| {
            tagging.start_spinner(&format!("Tagging {}", path.display()))
        })),
        on_take_saved: Some(Box::new(move |path: &Path| {
            saved.spinner_success(&format!("Saved {}", path.display()))
        })),
        on_take_discarded: Some(Box::new(move || discarded.warn("Take cancelled"))),
    }
}

/// Run an interactive recording session
pub async fn run_session(config: AppConfig, script: Option<String>) -> ExitCode {
    let presenter = Arc::new(Presenter::new());

    let address = config.obs_address_or_default();
    presenter.info(&format!("Connecting to OBS at {}", address));
    let backend = match ObsWebSocketClient::connect(address, config.obs_password()).await {
        Ok(backend) => backend,
        Err(e) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let use_case = RecordScriptUseCase::new(
        RecordingController::with_settle_delay(backend, config.settle_delay_or_default()),
        TerminalChooser::new(),
        ScriptDirectory::new(expand_home(config.script_location_or_default())),
        MarkdownScriptLoader::new(),
        TerminalRenderer::new(),
        FfmpegTagger::new(config.ffmpeg_path_or_default()),
    );

    let input = SessionInput {
        script,
        record_location: expand_home(config.record_location_or_default()),
        credits: config.credits(),
    };

    let result = tokio::select! {
        result = use_case.execute(input, session_callbacks(&presenter)) => {
            result.map_err(|e| e.to_string())
        }
        _ = tokio::signal::ctrl_c() => Err("Interrupted".to_string()),
    };

    match result {
        Ok(summary) => {
            presenter.summary(&summary);
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(message) => {
            // The spinner only runs while a take is being tagged
            presenter.spinner_fail("Tagging interrupted");
            presenter.error(&message);

            // Stop any take left running
            if let Err(e) = use_case.controller().ensure_stopped().await {
                debug!("Could not stop recording after failure: {}", e);
            }
            ExitCode::from(EXIT_ERROR)
        }
    }
}
