//! Operator choices offered by the take loop

/// A closed set of options presented to the operator, in display order.
pub trait Choice: Copy + Sized + 'static {
    const ALL: &'static [Self];

    fn label(&self) -> &'static str;

    /// Labels of every option, in display order
    fn labels() -> Vec<&'static str> {
        Self::ALL.iter().map(Choice::label).collect()
    }
}

/// Per-block decision shown before recording
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordDecision {
    Record,
    Ignore,
    Back,
    Reload,
}

impl Choice for RecordDecision {
    const ALL: &'static [Self] = &[Self::Record, Self::Ignore, Self::Back, Self::Reload];

    fn label(&self) -> &'static str {
        match self {
            Self::Record => "Record",
            Self::Ignore => "Ignore",
            Self::Back => "Back",
            Self::Reload => "Reload script",
        }
    }
}

/// Feedback on a take that is currently recording
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TakeFeedback {
    Good,
    Retake,
    Skip,
}

impl Choice for TakeFeedback {
    const ALL: &'static [Self] = &[Self::Good, Self::Retake, Self::Skip];

    fn label(&self) -> &'static str {
        match self {
            Self::Good => "✔︎ Good (Save & continue)",
            Self::Retake => "🗑 Retake (Delete take & start over)",
            Self::Skip => "⏹ Cancel (Delete & continue)",
        }
    }
}
