//! Capture backend adapters

mod obs_websocket;
pub mod protocol;

pub use obs_websocket::ObsWebSocketClient;
