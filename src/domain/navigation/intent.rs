//! Navigation intents and the position arithmetic behind them

use std::fmt;

/// What the next iteration of the script loop should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NavigationIntent {
    /// Move on to the next block (ignored block or accepted take)
    #[default]
    Advance,
    /// Show the previous block
    Back,
    /// Show the same block again after re-reading the script
    Reload,
    /// The take was abandoned; offer the same block again
    Skip,
}

impl NavigationIntent {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Advance => "advance",
            Self::Back => "back",
            Self::Reload => "reload",
            Self::Skip => "skip",
        }
    }
}

impl fmt::Display for NavigationIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Adjust `position` for `intent`, before the loop's own `+1` increment.
///
/// The result may be negative (`Back` from the first block); callers clamp.
pub const fn advance_from(position: i64, intent: NavigationIntent) -> i64 {
    match intent {
        NavigationIntent::Advance => position,
        NavigationIntent::Back => position - 2,
        NavigationIntent::Reload | NavigationIntent::Skip => position - 1,
    }
}
