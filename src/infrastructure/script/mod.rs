//! Script storage and parsing adapters

mod directory;
mod markdown;

pub use directory::ScriptDirectory;
pub use markdown::MarkdownScriptLoader;
