//! Take domain - per-block retake state machine, operator choices and metadata

mod decision;
mod metadata;
mod session;

pub use decision::{Choice, RecordDecision, TakeFeedback};
pub use metadata::{filename_stem, Credits, TakeMetadata, SKIP_FILENAME};
pub use session::{InvalidTakeTransition, TakeAttempt, TakeSession, TakeState, TakeStatus};
