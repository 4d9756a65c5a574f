//! Recording domain - backend-reported recording state

mod status;

pub use status::RecordingStatus;
