//! Data Transfer Objects for the gateway's wire surfaces.
//!
//! Organized by protocol:
//! - `websocket`: the tagged event protocol
//! - `http`: REST response shapes

pub mod conversion;
pub mod http;
pub mod websocket;
