//! Recording status as reported by the capture backend

use serde::Deserialize;

/// Backend view of the active recording.
///
/// Always queried fresh; the backend may be recording independently of us
/// (e.g. left running by a previous crashed session).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordingStatus {
    pub is_recording: bool,
    #[serde(default)]
    pub recording_filename: Option<String>,
}

impl RecordingStatus {
    /// Reported file path, treating an empty string as absent
    pub fn file_path(&self) -> Option<&str> {
        self.recording_filename
            .as_deref()
            .filter(|path| !path.is_empty())
    }
}
