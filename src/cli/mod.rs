//! CLI layer - Command-line interface
//!
//! Contains argument parsing, terminal prompts and rendering, output
//! formatting, and the application runners.

pub mod app;
pub mod args;
pub mod chooser;
pub mod config_cmd;
pub mod logging;
pub mod presenter;
pub mod renderer;

// Re-export commonly used types
pub use app::{list_scripts, run_session, EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE_ERROR};
pub use args::{Cli, Commands, ConfigAction};
pub use chooser::TerminalChooser;
pub use presenter::Presenter;
pub use renderer::TerminalRenderer;
