//! Position label within a script

use std::fmt;

/// Zero-based position plus total block count, shown one-based (`"2/5"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progression {
    pub index: usize,
    pub total: usize,
}

impl Progression {
    pub const fn new(index: usize, total: usize) -> Self {
        Self { index, total }
    }

    /// One-based block number
    pub const fn number(&self) -> usize {
        self.index + 1
    }
}

impl fmt::Display for Progression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.number(), self.total)
    }
}
