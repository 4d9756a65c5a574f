//! Take session state machine

use std::fmt;
use thiserror::Error;

/// Take loop states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TakeState {
    #[default]
    AwaitingStartDecision,
    Recording,
    AwaitingFeedback,
    Retaking,
    Accepted,
    Abandoned,
    Declined,
}

impl TakeState {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AwaitingStartDecision => "awaiting start decision",
            Self::Recording => "recording",
            Self::AwaitingFeedback => "awaiting feedback",
            Self::Retaking => "retaking",
            Self::Accepted => "accepted",
            Self::Abandoned => "abandoned",
            Self::Declined => "declined",
        }
    }

    /// Terminal states end the take loop for the current block
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Accepted | Self::Abandoned | Self::Declined)
    }
}

impl fmt::Display for TakeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Fate of a single recorded attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TakeStatus {
    #[default]
    Pending,
    Accepted,
    Discarded,
}

/// One recording attempt at a block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TakeAttempt {
    pub filename: String,
    pub status: TakeStatus,
}

/// Error when an invalid state transition is attempted
#[derive(Debug, Clone, Error)]
#[error("Invalid take transition: cannot {action} while {current_state}")]
pub struct InvalidTakeTransition {
    pub current_state: TakeState,
    pub action: String,
}

/// Take session entity for one block.
///
/// State machine:
///   AWAITING_START_DECISION -> RECORDING (begin_recording)
///   AWAITING_START_DECISION -> DECLINED (decline)
///   RECORDING -> AWAITING_FEEDBACK (recording_started)
///   AWAITING_FEEDBACK -> ACCEPTED (accept)
///   AWAITING_FEEDBACK -> RETAKING (retake)
///   AWAITING_FEEDBACK -> ABANDONED (abandon)
///   RETAKING -> RECORDING (begin_recording)
#[derive(Debug, Default)]
pub struct TakeSession {
    state: TakeState,
    attempt: Option<TakeAttempt>,
    attempts: usize,
}

impl TakeSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> TakeState {
        self.state
    }

    /// The most recent attempt, if recording ever started
    pub fn attempt(&self) -> Option<&TakeAttempt> {
        self.attempt.as_ref()
    }

    /// Number of recordings started for this block
    pub fn attempts(&self) -> usize {
        self.attempts
    }

    fn transition(
        &mut self,
        allowed: &[TakeState],
        next: TakeState,
        action: &str,
    ) -> Result<(), InvalidTakeTransition> {
        if !allowed.contains(&self.state) {
            return Err(InvalidTakeTransition {
                current_state: self.state,
                action: action.to_string(),
            });
        }
        self.state = next;
        Ok(())
    }

    fn settle_attempt(&mut self, status: TakeStatus) {
        if let Some(attempt) = self.attempt.as_mut() {
            attempt.status = status;
        }
    }

    /// Start (or restart) recording into `filename`
    pub fn begin_recording(&mut self, filename: &str) -> Result<(), InvalidTakeTransition> {
        self.transition(
            &[TakeState::AwaitingStartDecision, TakeState::Retaking],
            TakeState::Recording,
            "begin recording",
        )?;
        self.attempt = Some(TakeAttempt {
            filename: filename.to_string(),
            status: TakeStatus::Pending,
        });
        self.attempts += 1;
        Ok(())
    }

    /// The operator chose not to record this block
    pub fn decline(&mut self) -> Result<(), InvalidTakeTransition> {
        self.transition(
            &[TakeState::AwaitingStartDecision],
            TakeState::Declined,
            "decline",
        )
    }

    /// The backend confirmed the recording started
    pub fn recording_started(&mut self) -> Result<(), InvalidTakeTransition> {
        self.transition(
            &[TakeState::Recording],
            TakeState::AwaitingFeedback,
            "confirm recording",
        )
    }

    pub fn accept(&mut self) -> Result<(), InvalidTakeTransition> {
        self.transition(&[TakeState::AwaitingFeedback], TakeState::Accepted, "accept")?;
        self.settle_attempt(TakeStatus::Accepted);
        Ok(())
    }

    pub fn retake(&mut self) -> Result<(), InvalidTakeTransition> {
        self.transition(&[TakeState::AwaitingFeedback], TakeState::Retaking, "retake")?;
        self.settle_attempt(TakeStatus::Discarded);
        Ok(())
    }

    pub fn abandon(&mut self) -> Result<(), InvalidTakeTransition> {
        self.transition(&[TakeState::AwaitingFeedback], TakeState::Abandoned, "abandon")?;
        self.settle_attempt(TakeStatus::Discarded);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_awaits_decision() {
        let session = TakeSession::new();
        assert_eq!(session.state(), TakeState::AwaitingStartDecision);
        assert!(session.attempt().is_none());
    }

    #[test]
    fn decline_is_terminal() {
        let mut session = TakeSession::new();
        session.decline().unwrap();
        assert!(session.state().is_terminal());
        assert_eq!(session.attempts(), 0);
    }

    #[test]
    fn accept_cycle() {
        let mut session = TakeSession::new();
        session.begin_recording("intro.md-1").unwrap();
        session.recording_started().unwrap();
        session.accept().unwrap();

        assert_eq!(session.state(), TakeState::Accepted);
        let attempt = session.attempt().unwrap();
        assert_eq!(attempt.filename, "intro.md-1");
        assert_eq!(attempt.status, TakeStatus::Accepted);
    }

    #[test]
    fn retake_loops_back_to_recording() {
        let mut session = TakeSession::new();
        session.begin_recording("intro.md-1").unwrap();
        session.recording_started().unwrap();
        session.retake().unwrap();
        assert_eq!(session.attempt().unwrap().status, TakeStatus::Discarded);

        session.begin_recording("intro.md-1").unwrap();
        assert_eq!(session.state(), TakeState::Recording);
        assert_eq!(session.attempt().unwrap().status, TakeStatus::Pending);
        assert_eq!(session.attempts(), 2);
    }

    #[test]
    fn abandon_discards_attempt() {
        let mut session = TakeSession::new();
        session.begin_recording("intro.md-1").unwrap();
        session.recording_started().unwrap();
        session.abandon().unwrap();

        assert_eq!(session.state(), TakeState::Abandoned);
        assert_eq!(session.attempt().unwrap().status, TakeStatus::Discarded);
    }

    #[test]
    fn feedback_before_start_confirmation_fails() {
        let mut session = TakeSession::new();
        session.begin_recording("intro.md-1").unwrap();

        let err = session.accept().unwrap_err();
        assert_eq!(err.current_state, TakeState::Recording);
    }

    #[test]
    fn decline_after_recording_fails() {
        let mut session = TakeSession::new();
        session.begin_recording("intro.md-1").unwrap();
        assert!(session.decline().is_err());
    }

    #[test]
    fn error_display() {
        let err = InvalidTakeTransition {
            current_state: TakeState::Accepted,
            action: "retake".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("retake"));
        assert!(msg.contains("accepted"));
    }
}
