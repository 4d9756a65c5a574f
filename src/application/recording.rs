//! Recording session controller
//!
//! Owns start/stop semantics against the capture backend. The backend is
//! the source of truth for whether a recording is running, so every
//! operation queries it before acting.

use std::path::Path;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info};

use crate::domain::recording::RecordingStatus;

use super::ports::{BackendError, BackendEventKind, BackendRequest, CaptureBackend};

/// Pause before a start request, absorbing backend debounce of quick
/// stop/start cycles
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(500);

/// Errors from the recording controller
#[derive(Debug, Error)]
pub enum RecordingControlError {
    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error("Failed to start recording: {0}")]
    StartFailed(String),

    #[error("Backend reports no active recording")]
    NoActiveRecording,
}

/// Drives recordings on a capture backend.
///
/// Single-threaded use is assumed: at most one start or stop is in flight.
pub struct RecordingController<B: CaptureBackend> {
    backend: B,
    settle_delay: Duration,
}

impl<B: CaptureBackend> RecordingController<B> {
    /// Create a controller with the default settling delay
    pub fn new(backend: B) -> Self {
        Self::with_settle_delay(backend, DEFAULT_SETTLE_DELAY)
    }

    /// Create a controller with a custom settling delay
    pub fn with_settle_delay(backend: B, settle_delay: Duration) -> Self {
        Self {
            backend,
            settle_delay,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Query the backend's recording status
    pub async fn status(&self) -> Result<RecordingStatus, RecordingControlError> {
        let request = BackendRequest::GetRecordingStatus;
        let response = self.backend.request(request.clone()).await?;
        serde_json::from_value(response).map_err(|e| {
            BackendError::UnexpectedResponse {
                request: request.name().to_string(),
                message: e.to_string(),
            }
            .into()
        })
    }

    /// Stop any active recording and wait for the backend to confirm.
    ///
    /// Returns the finished file path, or the last known path when nothing
    /// was recording. No stop request is sent in that case.
    pub async fn ensure_stopped(&self) -> Result<Option<String>, RecordingControlError> {
        let status = self.status().await?;
        if !status.is_recording {
            debug!("Backend is not recording, nothing to stop");
            return Ok(status.file_path().map(str::to_string));
        }

        let stopped = self.backend.subscribe(BackendEventKind::RecordingStopped);
        self.backend.request(BackendRequest::StopRecording).await?;
        let event = stopped.wait().await?;

        let path = event
            .recording_filename
            .filter(|p| !p.is_empty())
            .or_else(|| status.file_path().map(str::to_string));
        info!(path = ?path, "Recording stopped");
        Ok(path)
    }

    /// Start recording into `folder` with the given filename format, and wait
    /// for the backend to confirm. Returns the path the backend reports.
    pub async fn start(
        &self,
        folder: &Path,
        filename_stem: &str,
    ) -> Result<Option<String>, RecordingControlError> {
        self.backend
            .request(BackendRequest::SetRecordingFolder(
                folder.to_string_lossy().to_string(),
            ))
            .await?;
        self.set_filename_format(filename_stem).await?;

        if !self.settle_delay.is_zero() {
            tokio::time::sleep(self.settle_delay).await;
        }

        let started = self.backend.subscribe(BackendEventKind::RecordingStarted);
        self.backend
            .request(BackendRequest::StartRecording)
            .await
            .map_err(|e| match e {
                BackendError::RequestFailed { message, .. } => {
                    RecordingControlError::StartFailed(message)
                }
                other => other.into(),
            })?;
        let event = started.wait().await?;

        info!(folder = %folder.display(), filename_stem, "Recording started");
        Ok(event.recording_filename)
    }

    /// Path of the active recording as reported by the backend
    pub async fn current_file_path(&self) -> Result<String, RecordingControlError> {
        let status = self.status().await?;
        status
            .file_path()
            .map(str::to_string)
            .ok_or(RecordingControlError::NoActiveRecording)
    }

    /// Set the filename format used for the next finished recording
    pub async fn set_filename_format(&self, format: &str) -> Result<(), RecordingControlError> {
        self.backend
            .request(BackendRequest::SetFilenameFormatting(format.to_string()))
            .await?;
        Ok(())
    }
}
