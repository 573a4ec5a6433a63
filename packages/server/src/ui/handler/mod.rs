//! Request handlers.

mod http;
mod websocket;

pub use http::{archive_inactive, get_active_rooms, get_room_messages, health_check};
pub use websocket::websocket_handler;
