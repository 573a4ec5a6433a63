//! Shared utilities for the Pixelchat room gateway.

pub mod logger;
pub mod time;
