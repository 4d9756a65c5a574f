//! obs-websocket 4.x message format
//!
//! Requests: `{"request-type": ..., "message-id": ..., <params>}`.
//! Responses: `{"message-id": ..., "status": "ok" | "error", "error": ..., <fields>}`.
//! Events: `{"update-type": ..., <fields>}`.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Deserialize;
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use crate::application::ports::{BackendEvent, BackendEventKind};

/// A decoded server message
#[derive(Debug, Clone, PartialEq)]
pub enum Incoming {
    Response {
        message_id: String,
        result: Result<Value, String>,
    },
    Event(BackendEvent),
    /// An event the session never waits on
    OtherEvent(String),
}

/// Reply to `GetAuthRequired`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthChallenge {
    pub auth_required: bool,
    #[serde(default)]
    pub challenge: Option<String>,
    #[serde(default)]
    pub salt: Option<String>,
}

/// Serialize a request with its parameters flattened alongside the envelope
pub fn encode_request(message_id: &str, request_type: &str, params: Value) -> String {
    let mut message = match params {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    message.insert("request-type".into(), Value::from(request_type));
    message.insert("message-id".into(), Value::from(message_id));
    Value::Object(message).to_string()
}

/// Parse a text frame from the server
pub fn decode(text: &str) -> Result<Incoming, String> {
    let value: Value = serde_json::from_str(text).map_err(|e| e.to_string())?;
    let Value::Object(fields) = value else {
        return Err("message is not a JSON object".to_string());
    };

    if let Some(message_id) = fields.get("message-id").and_then(Value::as_str) {
        let message_id = message_id.to_string();
        let status = fields.get("status").and_then(Value::as_str).unwrap_or("ok");
        let result = if status == "ok" {
            Ok(Value::Object(fields))
        } else {
            Err(fields
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or("unknown error")
                .to_string())
        };
        return Ok(Incoming::Response { message_id, result });
    }

    if let Some(update_type) = fields.get("update-type").and_then(Value::as_str) {
        let Some(kind) = BackendEventKind::from_wire(update_type) else {
            return Ok(Incoming::OtherEvent(update_type.to_string()));
        };
        let recording_filename = fields
            .get("recordingFilename")
            .and_then(Value::as_str)
            .map(str::to_string);
        return Ok(Incoming::Event(BackendEvent::new(kind, recording_filename)));
    }

    Err("message has neither message-id nor update-type".to_string())
}

fn sha256_base64(input: &str) -> String {
    STANDARD.encode(Sha256::digest(input.as_bytes()))
}

/// Authentication string for the `Authenticate` request
pub fn auth_response(password: &str, salt: &str, challenge: &str) -> String {
    let secret = sha256_base64(&format!("{}{}", password, salt));
    sha256_base64(&format!("{}{}", secret, challenge))
}
