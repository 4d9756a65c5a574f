//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with external systems like OBS, FFmpeg and the filesystem.

pub mod backend;
pub mod config;
pub mod script;
pub mod tagger;

// Re-export adapters
pub use backend::ObsWebSocketClient;
pub use config::XdgConfigStore;
pub use script::{MarkdownScriptLoader, ScriptDirectory};
pub use tagger::FfmpegTagger;
