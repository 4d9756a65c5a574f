//! Application layer - Use cases and port interfaces
//!
//! Contains the core business operations and trait definitions
//! for external system interactions.

pub mod ports;
pub mod recording;
pub mod session;
pub mod take_loop;

#[cfg(test)]
pub(crate) mod testing;

// Re-export use cases
pub use recording::{RecordingControlError, RecordingController, DEFAULT_SETTLE_DELAY};
pub use session::{
    RecordScriptUseCase, SessionCallbacks, SessionError, SessionInput, SessionSummary,
};
pub use take_loop::{TakeLoop, TakeLoopError, TakeOutcome, TakeRequest};
