//! Capture backend port
//!
//! The backend is driven with request/response round-trips and reports
//! recording transitions through asynchronous events. Waiting for an event
//! is single-shot: subscribe, trigger, then wait for exactly one delivery.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};
use thiserror::Error;
use tokio::sync::oneshot;

/// Backend errors
#[derive(Debug, Clone, Error)]
pub enum BackendError {
    #[error("Failed to connect to {address}: {message}")]
    ConnectFailed { address: String, message: String },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Request {request} failed: {message}")]
    RequestFailed { request: String, message: String },

    #[error("Unexpected response to {request}: {message}")]
    UnexpectedResponse { request: String, message: String },

    #[error("Connection to the backend was closed")]
    Disconnected,
}

/// Requests understood by the capture backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendRequest {
    GetRecordingStatus,
    StartRecording,
    StopRecording,
    SetRecordingFolder(String),
    SetFilenameFormatting(String),
}

impl BackendRequest {
    /// Wire name of the request
    pub const fn name(&self) -> &'static str {
        match self {
            Self::GetRecordingStatus => "GetRecordingStatus",
            Self::StartRecording => "StartRecording",
            Self::StopRecording => "StopRecording",
            Self::SetRecordingFolder(_) => "SetRecordingFolder",
            Self::SetFilenameFormatting(_) => "SetFilenameFormatting",
        }
    }

    /// Request parameters as a JSON object
    pub fn params(&self) -> Value {
        match self {
            Self::SetRecordingFolder(folder) => json!({ "rec-folder": folder }),
            Self::SetFilenameFormatting(format) => json!({ "filename-formatting": format }),
            _ => json!({}),
        }
    }
}

impl fmt::Display for BackendRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Events the session waits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendEventKind {
    RecordingStarted,
    RecordingStopped,
}

impl BackendEventKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::RecordingStarted => "RecordingStarted",
            Self::RecordingStopped => "RecordingStopped",
        }
    }

    /// Parse a wire event name; unknown events yield `None`
    pub fn from_wire(name: &str) -> Option<Self> {
        match name {
            "RecordingStarted" => Some(Self::RecordingStarted),
            "RecordingStopped" => Some(Self::RecordingStopped),
            _ => None,
        }
    }
}

impl fmt::Display for BackendEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A delivered backend event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendEvent {
    pub kind: BackendEventKind,
    pub recording_filename: Option<String>,
}

impl BackendEvent {
    pub fn new(kind: BackendEventKind, recording_filename: Option<String>) -> Self {
        Self {
            kind,
            recording_filename,
        }
    }
}

type Waiters = HashMap<u64, (BackendEventKind, oneshot::Sender<BackendEvent>)>;

/// Table of single-shot event subscriptions.
///
/// Events published while nobody waits for them are dropped.
#[derive(Debug, Default)]
pub struct EventHub {
    next_id: AtomicU64,
    waiters: Mutex<Waiters>,
    closed: AtomicBool,
}

impl EventHub {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Register a waiter for the next `kind` event
    pub fn subscribe(self: &Arc<Self>, kind: BackendEventKind) -> EventWaiter {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = oneshot::channel();
        {
            let mut waiters = self.lock();
            // After close the sender is dropped here, failing the wait at once
            if !self.closed.load(Ordering::SeqCst) {
                waiters.insert(id, (kind, tx));
            }
        }

        EventWaiter {
            id,
            kind,
            receiver: rx,
            hub: Arc::clone(self),
        }
    }

    /// Deliver `event` to every current waiter of its kind, removing them.
    /// Returns how many waiters received it.
    pub fn publish(&self, event: BackendEvent) -> usize {
        let matched: Vec<_> = {
            let mut waiters = self.lock();
            let ids: Vec<u64> = waiters
                .iter()
                .filter(|(_, (kind, _))| *kind == event.kind)
                .map(|(id, _)| *id)
                .collect();
            ids.into_iter().filter_map(|id| waiters.remove(&id)).collect()
        };

        matched
            .into_iter()
            .filter(|(_, tx)| !tx.is_closed())
            .map(|(_, tx)| tx.send(event.clone()).is_ok())
            .filter(|delivered| *delivered)
            .count()
    }

    /// Drop every waiter; pending and later waits fail with `Disconnected`
    pub fn close(&self) {
        let mut waiters = self.lock();
        self.closed.store(true, Ordering::SeqCst);
        waiters.clear();
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Number of registered waiters
    pub fn pending(&self) -> usize {
        self.lock().len()
    }

    fn unsubscribe(&self, id: u64) {
        self.lock().remove(&id);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Waiters> {
        // A poisoned table still holds valid senders
        self.waiters.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// A pending single-shot event subscription.
///
/// Dropping the waiter removes the subscription.
#[derive(Debug)]
pub struct EventWaiter {
    id: u64,
    kind: BackendEventKind,
    receiver: oneshot::Receiver<BackendEvent>,
    hub: Arc<EventHub>,
}

impl EventWaiter {
    pub fn kind(&self) -> BackendEventKind {
        self.kind
    }

    /// Suspend until the event fires
    pub async fn wait(mut self) -> Result<BackendEvent, BackendError> {
        (&mut self.receiver)
            .await
            .map_err(|_| BackendError::Disconnected)
    }
}

impl Drop for EventWaiter {
    fn drop(&mut self) {
        self.hub.unsubscribe(self.id);
    }
}

/// Port for the remote capture backend
#[async_trait]
pub trait CaptureBackend: Send + Sync {
    /// Send a request and wait for its response fields.
    async fn request(&self, request: BackendRequest) -> Result<Value, BackendError>;

    /// Register a single-shot waiter for the next `kind` event.
    ///
    /// Must be called before sending the request that triggers the event.
    fn subscribe(&self, kind: BackendEventKind) -> EventWaiter;

    /// Wait for the next `kind` event, subscribing now.
    async fn await_event(&self, kind: BackendEventKind) -> Result<BackendEvent, BackendError> {
        self.subscribe(kind).wait().await
    }
}
