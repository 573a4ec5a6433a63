//! HTTP API response shapes.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveRoomDto {
    pub topic_id: String,
    pub display_name: String,
    pub art_url: Option<String>,
    pub message_count: usize,
    pub user_count: usize,
    /// RFC 3339, UTC.
    pub last_active: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessagesResponseDto {
    pub topic_id: String,
    pub messages: Vec<super::websocket::MessageDto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchiveResultDto {
    pub archived: usize,
}
