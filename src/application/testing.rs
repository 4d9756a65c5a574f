//! In-memory fakes for the application ports, shared by the use case tests

use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::domain::script::{Block, ParsedScript};
use crate::domain::take::TakeMetadata;

use super::ports::{
    BackendError, BackendEvent, BackendEventKind, BackendRequest, CaptureBackend, Chooser,
    ChooserError, EventHub, EventWaiter, MediaTagger, Renderer, ScriptError, ScriptLoader,
    ScriptSource, TaggingError,
};

#[derive(Debug, Default)]
struct BackendState {
    is_recording: bool,
    folder: String,
    filename_format: String,
    last_path: Option<String>,
    requests: Vec<BackendRequest>,
    failing: Option<BackendRequest>,
    corrupt_status: bool,
}

/// Capture backend that records every request and emits start/stop events
pub struct FakeBackend {
    hub: Arc<EventHub>,
    state: Arc<Mutex<BackendState>>,
    stop_delay: Duration,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self {
            hub: EventHub::new(),
            state: Arc::new(Mutex::new(BackendState::default())),
            stop_delay: Duration::ZERO,
        }
    }

    /// Emit the stop event this long after the stop request
    pub fn with_stop_delay(mut self, delay: Duration) -> Self {
        self.stop_delay = delay;
        self
    }

    /// Pretend a recording is already running
    pub fn set_recording(&self, path: &str) {
        let mut state = self.state.lock().unwrap();
        state.is_recording = true;
        state.last_path = Some(path.to_string());
    }

    pub fn set_last_path(&self, path: &str) {
        self.state.lock().unwrap().last_path = Some(path.to_string());
    }

    /// Make the backend reject `request`
    pub fn fail_on(&self, request: BackendRequest) {
        self.state.lock().unwrap().failing = Some(request);
    }

    /// Make status responses miss the required fields
    pub fn corrupt_status(&self) {
        self.state.lock().unwrap().corrupt_status = true;
    }

    pub fn is_recording(&self) -> bool {
        self.state.lock().unwrap().is_recording
    }

    pub fn requests(&self) -> Vec<BackendRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    /// Requests other than status queries
    pub fn commands(&self) -> Vec<BackendRequest> {
        self.requests()
            .into_iter()
            .filter(|r| *r != BackendRequest::GetRecordingStatus)
            .collect()
    }

    pub fn count(&self, request: BackendRequest) -> usize {
        self.requests().iter().filter(|r| **r == request).count()
    }
}

#[async_trait]
impl CaptureBackend for FakeBackend {
    async fn request(&self, request: BackendRequest) -> Result<Value, BackendError> {
        let mut state = self.state.lock().unwrap();
        state.requests.push(request.clone());

        if state.failing.as_ref() == Some(&request) {
            return Err(BackendError::RequestFailed {
                request: request.name().to_string(),
                message: "rejected by fake".to_string(),
            });
        }

        match request {
            BackendRequest::GetRecordingStatus => {
                if state.corrupt_status {
                    return Ok(json!({ "recording": "maybe" }));
                }
                Ok(json!({
                    "isRecording": state.is_recording,
                    "recordingFilename": state.last_path,
                }))
            }
            BackendRequest::SetRecordingFolder(folder) => {
                state.folder = folder;
                Ok(json!({}))
            }
            BackendRequest::SetFilenameFormatting(format) => {
                state.filename_format = format;
                Ok(json!({}))
            }
            BackendRequest::StartRecording => {
                if state.is_recording {
                    return Err(BackendError::RequestFailed {
                        request: "StartRecording".to_string(),
                        message: "recording already active".to_string(),
                    });
                }
                let path = format!("{}/{}.mkv", state.folder, state.filename_format);
                state.is_recording = true;
                state.last_path = Some(path.clone());
                self.hub.publish(BackendEvent::new(
                    BackendEventKind::RecordingStarted,
                    Some(path),
                ));
                Ok(json!({}))
            }
            BackendRequest::StopRecording => {
                if !state.is_recording {
                    return Err(BackendError::RequestFailed {
                        request: "StopRecording".to_string(),
                        message: "recording not active".to_string(),
                    });
                }
                state.is_recording = false;
                let event = BackendEvent::new(
                    BackendEventKind::RecordingStopped,
                    state.last_path.clone(),
                );
                if self.stop_delay.is_zero() {
                    self.hub.publish(event);
                } else {
                    let hub = Arc::clone(&self.hub);
                    let delay = self.stop_delay;
                    tokio::spawn(async move {
                        tokio::time::sleep(delay).await;
                        hub.publish(event);
                    });
                }
                Ok(json!({}))
            }
        }
    }

    fn subscribe(&self, kind: BackendEventKind) -> EventWaiter {
        self.hub.subscribe(kind)
    }
}

/// Chooser answering from a queue of label prefixes
pub struct ScriptedChooser {
    answers: Mutex<VecDeque<&'static str>>,
    asked: Mutex<Vec<String>>,
}

impl ScriptedChooser {
    pub fn new(answers: &[&'static str]) -> Self {
        Self {
            answers: Mutex::new(answers.iter().copied().collect()),
            asked: Mutex::new(Vec::new()),
        }
    }

    /// Messages presented so far
    pub fn asked(&self) -> Vec<String> {
        self.asked.lock().unwrap().clone()
    }

    pub fn remaining(&self) -> usize {
        self.answers.lock().unwrap().len()
    }
}

#[async_trait]
impl Chooser for ScriptedChooser {
    async fn choose(&self, message: &str, options: &[&str]) -> Result<usize, ChooserError> {
        self.asked.lock().unwrap().push(message.to_string());
        let answer = self
            .answers
            .lock()
            .unwrap()
            .pop_front()
            .ok_or(ChooserError::InputClosed)?;

        options
            .iter()
            .position(|o| o.contains(answer))
            .ok_or(ChooserError::OutOfRange(options.len()))
    }
}

/// Tagger that records what it was asked to tag
#[derive(Clone, Default)]
pub struct RecordingTagger {
    calls: Arc<Mutex<Vec<(PathBuf, TakeMetadata)>>>,
    fail: bool,
}

impl RecordingTagger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<(PathBuf, TakeMetadata)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl MediaTagger for RecordingTagger {
    async fn tag(&self, file: &Path, metadata: &TakeMetadata) -> Result<(), TaggingError> {
        self.calls
            .lock()
            .unwrap()
            .push((file.to_path_buf(), metadata.clone()));
        if self.fail {
            return Err(TaggingError::ProcessFailed {
                status: "exit status: 1".to_string(),
                message: "fake failure".to_string(),
            });
        }
        Ok(())
    }
}

/// Script source backed by a map; content can change between reads
#[derive(Clone, Default)]
pub struct MemoryScripts {
    scripts: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryScripts {
    pub fn with(name: &str, content: &str) -> Self {
        let scripts = Self::default();
        scripts.put(name, content);
        scripts
    }

    pub fn put(&self, name: &str, content: &str) {
        self.scripts
            .lock()
            .unwrap()
            .insert(name.to_string(), content.to_string());
    }
}

#[async_trait]
impl ScriptSource for MemoryScripts {
    async fn list(&self) -> Result<Vec<String>, ScriptError> {
        let mut names: Vec<String> = self.scripts.lock().unwrap().keys().cloned().collect();
        names.sort();
        if names.is_empty() {
            return Err(ScriptError::NoScripts("memory".to_string()));
        }
        Ok(names)
    }

    async fn read(&self, name: &str) -> Result<String, ScriptError> {
        self.scripts
            .lock()
            .unwrap()
            .get(name)
            .cloned()
            .ok_or_else(|| ScriptError::ReadFailed {
                name: name.to_string(),
                message: "not found".to_string(),
            })
    }
}

/// Loader for a line format: `# Title` first, then one block per line
pub struct LineLoader;

impl ScriptLoader for LineLoader {
    fn load(&self, raw: &str) -> ParsedScript {
        let mut lines = raw.lines().filter(|l| !l.trim().is_empty()).peekable();
        let title = lines
            .peek()
            .and_then(|l| l.strip_prefix("# "))
            .map(str::to_string);
        if title.is_some() {
            lines.next();
        }

        ParsedScript {
            title,
            blocks: lines.map(Block::plain).collect(),
        }
    }
}

/// Renderer returning its input
pub struct PlainRenderer;

impl Renderer for PlainRenderer {
    fn render(&self, markdown: &str) -> String {
        markdown.to_string()
    }
}
