//! Cursor over the block sequence

use super::intent::{advance_from, NavigationIntent};
use crate::domain::script::Progression;

/// Position within the script, owned by the session loop.
///
/// The block count is refreshed every iteration because the script is
/// re-read between blocks; the position stays a plain index into whatever
/// the sequence currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    position: usize,
    block_count: usize,
}

impl Cursor {
    /// Cursor at the first block
    pub const fn new(block_count: usize) -> Self {
        Self {
            position: 0,
            block_count,
        }
    }

    pub const fn position(&self) -> usize {
        self.position
    }

    pub const fn block_count(&self) -> usize {
        self.block_count
    }

    /// Update the block count after the script was re-read
    pub fn resize(&mut self, block_count: usize) {
        self.block_count = block_count;
    }

    /// True once the cursor has moved past the last block
    pub const fn is_finished(&self) -> bool {
        self.position >= self.block_count
    }

    /// Label for the current position
    pub const fn progression(&self) -> Progression {
        Progression::new(self.position, self.block_count)
    }

    /// Apply `intent` and the per-iteration increment.
    ///
    /// Negative positions mean "no previous block" and clamp to the first one.
    pub fn step(&mut self, intent: NavigationIntent) {
        let next = advance_from(self.position as i64, intent) + 1;
        self.position = next.max(0) as usize;
    }
}
