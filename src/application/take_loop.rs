//! Per-block take loop
//!
//! Repeats "start recording, ask for feedback, stop" until the operator
//! accepts a take or abandons the block. Every exit path goes through a
//! confirmed stop, so the next block never starts while a take is running.

use std::path::PathBuf;

use thiserror::Error;
use tracing::debug;

use crate::domain::navigation::NavigationIntent;
use crate::domain::take::{
    InvalidTakeTransition, RecordDecision, TakeFeedback, TakeSession, SKIP_FILENAME,
};

use super::ports::{ask, CaptureBackend, Chooser, ChooserError};
use super::recording::{RecordingControlError, RecordingController};
use super::session::SessionCallbacks;

/// Question shown while a take is recording
pub const FEEDBACK_PROMPT: &str = "How was the take";

/// Errors from the take loop
#[derive(Debug, Error)]
pub enum TakeLoopError {
    #[error(transparent)]
    Recording(#[from] RecordingControlError),

    #[error(transparent)]
    Chooser(#[from] ChooserError),

    #[error(transparent)]
    InvalidState(#[from] InvalidTakeTransition),
}

/// What to record for one block
#[derive(Debug, Clone)]
pub struct TakeRequest {
    /// Backend folder for the recording
    pub folder: PathBuf,
    /// Filename format, identical for every retake of the block
    pub filename_stem: String,
    /// Rendered teleprompter screen, shown again before each take
    pub screen: String,
}

/// How the take loop ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TakeOutcome {
    /// The operator did not record the block
    NotRecorded,
    /// A take was accepted and is stopped
    Accepted { file_path: PathBuf, attempts: usize },
    /// The take was cancelled; the block should be offered again
    Abandoned,
}

impl TakeOutcome {
    /// Navigation that follows this outcome
    pub const fn intent(&self) -> NavigationIntent {
        match self {
            Self::NotRecorded | Self::Accepted { .. } => NavigationIntent::Advance,
            Self::Abandoned => NavigationIntent::Skip,
        }
    }
}

/// Take loop for one block
pub struct TakeLoop<'a, B: CaptureBackend, C: Chooser> {
    controller: &'a RecordingController<B>,
    chooser: &'a C,
}

impl<'a, B: CaptureBackend, C: Chooser> TakeLoop<'a, B, C> {
    pub fn new(controller: &'a RecordingController<B>, chooser: &'a C) -> Self {
        Self {
            controller,
            chooser,
        }
    }

    /// Run the loop for a block the operator decided on
    pub async fn run(
        &self,
        decision: RecordDecision,
        request: &TakeRequest,
        callbacks: &SessionCallbacks,
    ) -> Result<TakeOutcome, TakeLoopError> {
        let mut session = TakeSession::new();

        if decision != RecordDecision::Record {
            session.decline()?;
            return Ok(TakeOutcome::NotRecorded);
        }

        loop {
            session.begin_recording(&request.filename_stem)?;
            callbacks.screen(&request.screen);

            self.controller.ensure_stopped().await?;
            self.controller
                .start(&request.folder, &request.filename_stem)
                .await?;
            session.recording_started()?;
            callbacks.recording_start();

            let feedback: TakeFeedback = ask(self.chooser, FEEDBACK_PROMPT).await?;
            debug!(?feedback, attempt = session.attempts(), "Take feedback");

            match feedback {
                TakeFeedback::Good => {
                    let file_path = self.controller.current_file_path().await?;
                    self.controller.ensure_stopped().await?;
                    session.accept()?;
                    return Ok(TakeOutcome::Accepted {
                        file_path: PathBuf::from(file_path),
                        attempts: session.attempts(),
                    });
                }
                TakeFeedback::Retake => {
                    self.controller.ensure_stopped().await?;
                    session.retake()?;
                }
                TakeFeedback::Skip => {
                    self.controller.set_filename_format(SKIP_FILENAME).await?;
                    self.controller.ensure_stopped().await?;
                    session.abandon()?;
                    callbacks.take_discarded();
                    return Ok(TakeOutcome::Abandoned);
                }
            }
        }
    }
}
