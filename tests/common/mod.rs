//! In-process obs-websocket 4.x server shared by the integration tests

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use futures_util::{SinkExt, StreamExt};
use serde_json::{json, Value};
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::accept_async;
use tokio_tungstenite::tungstenite::Message;

use take_prompter::infrastructure::backend::protocol::auth_response;

const SALT: &str = "mock-salt";
const CHALLENGE: &str = "mock-challenge";

#[derive(Clone, Default)]
pub struct MockOptions {
    pub password: Option<&'static str>,
    /// Close the socket instead of answering this request type
    pub hang_up_on: Option<&'static str>,
}

#[derive(Default)]
struct MockState {
    recording: bool,
    folder: String,
    format: String,
    last_path: String,
}

impl MockState {
    fn ok(fields: Value) -> Value {
        let mut reply = json!({ "status": "ok" });
        if let (Some(reply), Value::Object(fields)) = (reply.as_object_mut(), fields) {
            reply.extend(fields);
        }
        reply
    }

    fn error(message: &str) -> Value {
        json!({ "status": "error", "error": message })
    }

    /// Reply to a request plus an optional event sent right after it
    fn handle(
        &mut self,
        kind: &str,
        request: &Value,
        options: &MockOptions,
    ) -> (Value, Option<Value>) {
        match kind {
            "GetAuthRequired" => match options.password {
                Some(_) => (
                    Self::ok(json!({ "authRequired": true, "salt": SALT, "challenge": CHALLENGE })),
                    None,
                ),
                None => (Self::ok(json!({ "authRequired": false })), None),
            },
            "Authenticate" => {
                let expected = options
                    .password
                    .map(|p| auth_response(p, SALT, CHALLENGE))
                    .unwrap_or_default();
                if request["auth"].as_str() == Some(expected.as_str()) {
                    (Self::ok(json!({})), None)
                } else {
                    (Self::error("Authentication Failed."), None)
                }
            }
            "GetRecordingStatus" => (
                Self::ok(json!({
                    "isRecording": self.recording,
                    "recordingFilename": self.last_path,
                })),
                None,
            ),
            "SetRecordingFolder" => {
                self.folder = request["rec-folder"].as_str().unwrap_or_default().to_string();
                (
                    Self::ok(json!({})),
                    Some(json!({ "update-type": "Heartbeat", "pulse": true })),
                )
            }
            "SetFilenameFormatting" => {
                self.format = request["filename-formatting"]
                    .as_str()
                    .unwrap_or_default()
                    .to_string();
                (Self::ok(json!({})), None)
            }
            "StartRecording" if self.recording => (Self::error("recording already active"), None),
            "StartRecording" => {
                self.recording = true;
                self.last_path = format!("{}/{}.mkv", self.folder, self.format);
                (
                    Self::ok(json!({})),
                    Some(json!({
                        "update-type": "RecordingStarted",
                        "recordingFilename": self.last_path,
                    })),
                )
            }
            "StopRecording" if !self.recording => (Self::error("recording not active"), None),
            "StopRecording" => {
                self.recording = false;
                (
                    Self::ok(json!({})),
                    Some(json!({
                        "update-type": "RecordingStopped",
                        "recordingFilename": self.last_path,
                    })),
                )
            }
            _ => (Self::error("invalid request type"), None),
        }
    }
}

pub struct MockObs {
    pub address: String,
    log: Arc<Mutex<Vec<String>>>,
}

impl MockObs {
    pub async fn start(options: MockOptions) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap().to_string();
        let log = Arc::new(Mutex::new(Vec::new()));

        let server_log = Arc::clone(&log);
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                tokio::spawn(serve(stream, options.clone(), Arc::clone(&server_log)));
            }
        });

        Self { address, log }
    }

    pub fn requests(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }

    pub fn count(&self, kind: &str) -> usize {
        self.requests().iter().filter(|r| *r == kind).count()
    }
}

async fn serve(stream: TcpStream, options: MockOptions, log: Arc<Mutex<Vec<String>>>) {
    let Ok(mut ws) = accept_async(stream).await else {
        return;
    };
    let mut state = MockState::default();

    while let Some(Ok(message)) = ws.next().await {
        let Message::Text(text) = message else {
            continue;
        };
        let request: Value = serde_json::from_str(text.as_str()).unwrap();
        let kind = request["request-type"].as_str().unwrap().to_string();
        log.lock().unwrap().push(kind.clone());

        if options.hang_up_on == Some(kind.as_str()) {
            let _ = ws.close(None).await;
            return;
        }

        let (mut reply, event) = state.handle(&kind, &request, &options);
        reply["message-id"] = request["message-id"].clone();
        if ws.send(Message::text(reply.to_string())).await.is_err() {
            return;
        }
        if let Some(event) = event {
            if ws.send(Message::text(event.to_string())).await.is_err() {
                return;
            }
        }
    }
}
