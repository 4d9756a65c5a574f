//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod backend;
pub mod chooser;
pub mod config;
pub mod script;
pub mod tagger;

// Re-export common types
pub use backend::{
    BackendError, BackendEvent, BackendEventKind, BackendRequest, CaptureBackend, EventHub,
    EventWaiter,
};
pub use chooser::{ask, Chooser, ChooserError};
pub use config::ConfigStore;
pub use script::{Renderer, ScriptError, ScriptLoader, ScriptSource};
pub use tagger::{MediaTagger, TaggingError};
