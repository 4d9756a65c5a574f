//! Domain layer - Core business logic
//!
//! Contains value objects, entities, and domain errors.
//! This layer has no dependencies on external systems.

pub mod config;
pub mod error;
pub mod navigation;
pub mod recording;
pub mod script;
pub mod take;

// Re-export common types
pub use config::AppConfig;
pub use error::*;
pub use navigation::{advance_from, Cursor, NavigationIntent};
pub use recording::RecordingStatus;
pub use script::{Block, ParsedScript, Progression, ScriptDocument};
pub use take::{Credits, TakeMetadata, TakeSession, TakeState};
