//! Script domain - blocks, documents and positions

mod document;
mod progression;

pub use document::{Block, ParsedScript, ScriptDocument};
pub use progression::Progression;
