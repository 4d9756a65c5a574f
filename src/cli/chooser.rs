//! Terminal chooser adapter

use std::io::{self, BufRead};
use std::thread;

use async_trait::async_trait;
use colored::*;
use tokio::sync::{mpsc, Mutex};

use crate::application::ports::{Chooser, ChooserError};

type Lines = mpsc::Receiver<io::Result<String>>;

/// Numbered-list prompt on stderr, answered on stdin.
///
/// The operator types either the option number or a unique prefix of the
/// option's first word (`g` for "Good", `rel` for "Reload script").
///
/// Input is read on its own thread, so a pending prompt never holds the
/// runtime open once the session is dropped.
pub struct TerminalChooser {
    lines: Mutex<Lines>,
}

impl TerminalChooser {
    pub fn new() -> Self {
        Self::spawn_reader(|| io::stdin().lock())
    }

    /// Answer prompts from `reader` instead of stdin
    pub fn with_reader<R>(reader: R) -> Self
    where
        R: BufRead + Send + 'static,
    {
        Self::spawn_reader(move || reader)
    }

    fn spawn_reader<F, R>(open: F) -> Self
    where
        F: FnOnce() -> R + Send + 'static,
        R: BufRead,
    {
        let (tx, rx) = mpsc::channel(1);
        thread::spawn(move || {
            let mut reader = open();
            loop {
                let mut line = String::new();
                let result = match reader.read_line(&mut line) {
                    Ok(0) => break,
                    Ok(_) => Ok(line),
                    Err(e) => Err(e),
                };
                let failed = result.is_err();
                if tx.blocking_send(result).is_err() || failed {
                    break;
                }
            }
        });

        Self {
            lines: Mutex::new(rx),
        }
    }

    fn print_options(message: &str, options: &[&str]) {
        eprintln!("{} {}", "?".green().bold(), message.bold());
        for (i, option) in options.iter().enumerate() {
            eprintln!("  {} {}", format!("{})", i + 1).cyan(), option);
        }
    }
}

impl Default for TerminalChooser {
    fn default() -> Self {
        Self::new()
    }
}

/// First word of a label, skipping leading symbols and emoji
fn keyword(label: &str) -> String {
    label
        .trim_start_matches(|c: char| !c.is_alphanumeric())
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

/// Map operator input onto an option index
pub fn resolve_choice(input: &str, options: &[&str]) -> Option<usize> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(number) = input.parse::<usize>() {
        return (1..=options.len()).contains(&number).then(|| number - 1);
    }

    let needle = input.to_lowercase();
    let mut matches = options
        .iter()
        .enumerate()
        .filter(|(_, option)| keyword(option).starts_with(&needle));

    match (matches.next(), matches.next()) {
        (Some((index, _)), None) => Some(index),
        _ => None,
    }
}

#[async_trait]
impl Chooser for TerminalChooser {
    async fn choose(&self, message: &str, options: &[&str]) -> Result<usize, ChooserError> {
        if options.is_empty() {
            return Err(ChooserError::NoOptions);
        }

        Self::print_options(message, options);
        let mut lines = self.lines.lock().await;

        loop {
            eprint!("{} ", ">".cyan());
            let line = match lines.recv().await {
                Some(Ok(line)) => line,
                Some(Err(e)) => return Err(ChooserError::Io(e.to_string())),
                None => return Err(ChooserError::InputClosed),
            };

            match resolve_choice(&line, options) {
                Some(index) => return Ok(index),
                None => eprintln!(
                    "{} Enter a number from 1 to {} or the start of an option",
                    "⚠".yellow(),
                    options.len()
                ),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::take::{Choice, RecordDecision, TakeFeedback};

    #[test]
    fn resolves_numbers() {
        let options = RecordDecision::labels();
        assert_eq!(resolve_choice("1", &options), Some(0));
        assert_eq!(resolve_choice(" 4 \n", &options), Some(3));
        assert_eq!(resolve_choice("0", &options), None);
        assert_eq!(resolve_choice("5", &options), None);
    }

    #[test]
    fn resolves_unique_prefixes() {
        let options = RecordDecision::labels();
        assert_eq!(resolve_choice("i", &options), Some(1));
        assert_eq!(resolve_choice("Back", &options), Some(2));
        assert_eq!(resolve_choice("rel", &options), Some(3));
        assert_eq!(resolve_choice("rec", &options), Some(0));
    }

    #[test]
    fn ambiguous_or_unknown_input_is_rejected() {
        let options = RecordDecision::labels();
        assert_eq!(resolve_choice("re", &options), None);
        assert_eq!(resolve_choice("x", &options), None);
        assert_eq!(resolve_choice("", &options), None);
    }

    #[test]
    fn feedback_labels_match_past_symbols() {
        let options = TakeFeedback::labels();
        assert_eq!(resolve_choice("g", &options), Some(0));
        assert_eq!(resolve_choice("retake", &options), Some(1));
        assert_eq!(resolve_choice("c", &options), Some(2));
    }

    #[tokio::test]
    async fn reprompts_until_valid() {
        let chooser = TerminalChooser::with_reader(&b"nope\n9\n2\n"[..]);
        let index = chooser.choose("Pick", &["alpha", "beta"]).await.unwrap();
        assert_eq!(index, 1);
    }

    #[tokio::test]
    async fn eof_closes_input() {
        let chooser = TerminalChooser::with_reader(&b"nope\n"[..]);
        let result = chooser.choose("Pick", &["alpha", "beta"]).await;
        assert!(matches!(result, Err(ChooserError::InputClosed)));
    }

    #[tokio::test]
    async fn no_options() {
        let chooser = TerminalChooser::with_reader(&b"1\n"[..]);
        let result = chooser.choose("Pick", &[]).await;
        assert!(matches!(result, Err(ChooserError::NoOptions)));
    }
}
