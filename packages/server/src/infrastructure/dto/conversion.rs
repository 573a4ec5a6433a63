//! Conversion between domain models and wire DTOs.

use crate::domain::{ChatMessage, Identity};
use crate::infrastructure::dto::http::ActiveRoomDto;
use crate::infrastructure::dto::websocket::{MemberDto, MessageDto};
use crate::usecase::ActiveRoomView;

impl From<&ChatMessage> for MessageDto {
    fn from(message: &ChatMessage) -> Self {
        Self {
            author_id: message.author_id.clone(),
            author_name: message.author_name.clone(),
            content: message.content.as_str().to_string(),
            registered: message.registered,
            created_at: message.created_at.value(),
        }
    }
}

impl From<&Identity> for MemberDto {
    fn from(identity: &Identity) -> Self {
        Self {
            id: identity.id.clone(),
            display_name: identity.display_name.clone(),
            anonymous: identity.anonymous,
        }
    }
}

impl From<&ActiveRoomView> for ActiveRoomDto {
    fn from(view: &ActiveRoomView) -> Self {
        Self {
            topic_id: view.topic_id.as_str().to_string(),
            display_name: view.display_name.clone(),
            art_url: view.art_url.clone(),
            message_count: view.message_count,
            user_count: view.user_count,
            last_active: pixelchat_shared::time::millis_to_rfc3339(view.last_active.value()),
        }
    }
}
