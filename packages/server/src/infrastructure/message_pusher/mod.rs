//! Message pusher implementations.
//!
//! The WebSocket is created in the UI layer; this layer owns the registry
//! of live sender channels and performs delivery.

pub mod websocket;

pub use websocket::WebSocketMessagePusher;
