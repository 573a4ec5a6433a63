//! Real-time room gateway for Pixelchat.
//!
//! Clients connect over a single WebSocket, get bound to an identity
//! (registered or anonymous), join per-topic rooms, and exchange short text
//! messages with bounded history and anonymous-sender rate limiting.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
