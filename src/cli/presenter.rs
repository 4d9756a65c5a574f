//! CLI presenter for output formatting

use std::io::{self, IsTerminal, Write};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use colored::*;
use crossterm::cursor::MoveTo;
use crossterm::terminal::{Clear, ClearType};
use crossterm::ExecutableCommand;
use indicatif::{ProgressBar, ProgressStyle};

use crate::application::SessionSummary;

/// Presenter for CLI output formatting.
///
/// Shared between session callbacks, so the spinner lives behind a mutex.
pub struct Presenter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn spinner(&self) -> MutexGuard<'_, Option<ProgressBar>> {
        self.spinner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Start a spinner with message
    pub fn start_spinner(&self, message: &str) {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.cyan} {msg}")
        {
            spinner.set_style(style);
        }
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(80));

        if let Some(previous) = self.spinner().replace(spinner) {
            previous.finish_and_clear();
        }
    }

    /// Mark spinner as success and finish
    pub fn spinner_success(&self, message: &str) {
        if let Some(spinner) = self.spinner().take() {
            spinner.finish_with_message(format!("{} {}", "✓".green(), message));
        }
    }

    /// Mark spinner as failed and finish
    pub fn spinner_fail(&self, message: &str) {
        if let Some(spinner) = self.spinner().take() {
            spinner.finish_with_message(format!("{} {}", "✗".red(), message));
        }
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        eprintln!("{} {}", "ℹ".cyan(), message);
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Output text to stdout
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Clear the terminal and home the cursor; a no-op when stdout is piped
    pub fn clear_screen(&self) {
        let mut stdout = io::stdout();
        if !stdout.is_terminal() {
            return;
        }
        let _ = stdout
            .execute(Clear(ClearType::All))
            .and_then(|out| out.execute(MoveTo(0, 0)));
    }

    /// Replace the terminal contents with a teleprompter screen
    pub fn screen(&self, text: &str) {
        self.clear_screen();
        println!("{}\n", text);
        let _ = io::stdout().flush();
    }

    /// Announce that the backend is recording, ringing the terminal bell
    pub fn recording_banner(&self) {
        eprintln!("{}\x07", "🔴 Recording...".red().bold());
    }

    /// Print the end-of-script summary
    pub fn summary(&self, summary: &SessionSummary) {
        self.success(&format!(
            "Finished \"{}\": {} saved, {} cancelled, {} ignored",
            summary.title, summary.accepted, summary.abandoned, summary.ignored
        ));
    }

    /// Print a key-value pair (for config list)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spinner_lifecycle() {
        let presenter = Presenter::new();
        presenter.start_spinner("Tagging");
        presenter.start_spinner("Tagging again");
        assert!(presenter.spinner().is_some());

        presenter.spinner_success("Tagged");
        assert!(presenter.spinner().is_none());

        presenter.spinner_fail("not running");
        assert!(presenter.spinner().is_none());
    }
}
