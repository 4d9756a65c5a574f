//! obs-websocket capture backend adapter

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use serde_json::{json, Value};
use tokio::net::TcpStream;
use tokio::sync::{oneshot, Mutex as AsyncMutex};
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, trace, warn};

use crate::application::ports::{
    BackendError, BackendEventKind, BackendRequest, CaptureBackend, EventHub, EventWaiter,
};

use super::protocol::{self, AuthChallenge, Incoming};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
type PendingRequests = Arc<Mutex<HashMap<String, oneshot::Sender<Result<Value, BackendError>>>>>;

/// Client for the obs-websocket 4.x protocol.
///
/// A background reader routes responses to their requests by message id
/// and recording events to the [`EventHub`].
pub struct ObsWebSocketClient {
    sink: AsyncMutex<SplitSink<WsStream, Message>>,
    pending: PendingRequests,
    events: Arc<EventHub>,
    next_id: AtomicU64,
    reader: JoinHandle<()>,
}

impl ObsWebSocketClient {
    /// Connect to `address` (`host:port` or a `ws://` URL) and authenticate
    /// when the server requires it.
    pub async fn connect(address: &str, password: Option<&str>) -> Result<Self, BackendError> {
        let url = Self::url(address);
        debug!(url = %url, "Connecting to OBS");

        let (stream, _) =
            connect_async(url.as_str())
                .await
                .map_err(|e| BackendError::ConnectFailed {
                    address: address.to_string(),
                    message: e.to_string(),
                })?;

        let (sink, stream) = stream.split();
        let pending: PendingRequests = Arc::new(Mutex::new(HashMap::new()));
        let events = EventHub::new();
        let reader = tokio::spawn(Self::read_loop(
            stream,
            Arc::clone(&pending),
            Arc::clone(&events),
        ));

        let client = Self {
            sink: AsyncMutex::new(sink),
            pending,
            events,
            next_id: AtomicU64::new(1),
            reader,
        };
        client.authenticate(password).await?;
        debug!("Connected to OBS");
        Ok(client)
    }

    fn url(address: &str) -> String {
        if address.contains("://") {
            address.to_string()
        } else {
            format!("ws://{}", address)
        }
    }

    async fn authenticate(&self, password: Option<&str>) -> Result<(), BackendError> {
        let response = self.call("GetAuthRequired", json!({})).await?;
        let challenge: AuthChallenge =
            serde_json::from_value(response).map_err(|e| BackendError::UnexpectedResponse {
                request: "GetAuthRequired".to_string(),
                message: e.to_string(),
            })?;

        if !challenge.auth_required {
            return Ok(());
        }

        let password = password.ok_or_else(|| {
            BackendError::AuthenticationFailed("OBS requires a password".to_string())
        })?;
        let (Some(salt), Some(nonce)) = (challenge.salt, challenge.challenge) else {
            return Err(BackendError::AuthenticationFailed(
                "server did not send a challenge".to_string(),
            ));
        };

        let auth = protocol::auth_response(password, &salt, &nonce);
        self.call("Authenticate", json!({ "auth": auth }))
            .await
            .map_err(|e| match e {
                BackendError::RequestFailed { message, .. } => {
                    BackendError::AuthenticationFailed(message)
                }
                other => other,
            })?;
        Ok(())
    }

    /// Send a raw request and wait for its response
    async fn call(&self, request_type: &str, params: Value) -> Result<Value, BackendError> {
        let message_id = self.next_id.fetch_add(1, Ordering::Relaxed).to_string();
        let (tx, rx) = oneshot::channel();
        lock(&self.pending).insert(message_id.clone(), tx);
        // The reader closes the hub before draining `pending`
        if self.events.is_closed() {
            lock(&self.pending).remove(&message_id);
            return Err(BackendError::Disconnected);
        }

        let text = protocol::encode_request(&message_id, request_type, params);
        trace!(request_type, message_id = %message_id, "Sending request");

        let sent = self.sink.lock().await.send(Message::text(text)).await;
        if let Err(e) = sent {
            lock(&self.pending).remove(&message_id);
            return Err(BackendError::Transport(e.to_string()));
        }

        rx.await
            .map_err(|_| BackendError::Disconnected)?
            .map_err(|e| match e {
                BackendError::RequestFailed { message, .. } => BackendError::RequestFailed {
                    request: request_type.to_string(),
                    message,
                },
                other => other,
            })
    }

    async fn read_loop(
        mut stream: SplitStream<WsStream>,
        pending: PendingRequests,
        events: Arc<EventHub>,
    ) {
        while let Some(message) = stream.next().await {
            match message {
                Ok(Message::Text(text)) => Self::dispatch(text.as_str(), &pending, &events),
                Ok(Message::Close(frame)) => {
                    debug!(?frame, "OBS closed the connection");
                    break;
                }
                Ok(_) => {}
                Err(e) => {
                    warn!("OBS connection error: {}", e);
                    break;
                }
            }
        }

        // Dropping the senders fails every outstanding request and waiter
        events.close();
        lock(&pending).clear();
    }

    fn dispatch(text: &str, pending: &PendingRequests, events: &EventHub) {
        match protocol::decode(text) {
            Ok(Incoming::Response { message_id, result }) => {
                let Some(tx) = lock(pending).remove(&message_id) else {
                    trace!(message_id = %message_id, "Response for unknown request");
                    return;
                };
                let result = result.map_err(|message| BackendError::RequestFailed {
                    request: String::new(),
                    message,
                });
                let _ = tx.send(result);
            }
            Ok(Incoming::Event(event)) => {
                let delivered = events.publish(event.clone());
                debug!(kind = %event.kind, delivered, "Backend event");
            }
            Ok(Incoming::OtherEvent(name)) => trace!(event = %name, "Ignoring event"),
            Err(e) => warn!("Malformed message from OBS: {}", e),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

impl Drop for ObsWebSocketClient {
    fn drop(&mut self) {
        self.reader.abort();
    }
}

#[async_trait]
impl CaptureBackend for ObsWebSocketClient {
    async fn request(&self, request: BackendRequest) -> Result<Value, BackendError> {
        self.call(request.name(), request.params()).await
    }

    fn subscribe(&self, kind: BackendEventKind) -> EventWaiter {
        self.events.subscribe(kind)
    }
}
