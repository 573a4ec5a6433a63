//! Domain entities: identities, messages and rooms.

use super::value_object::{MessageContent, Timestamp, TopicId};

/// A room's message log never holds more than this many entries; appending
/// past the cap evicts the oldest entry first (pure insertion order).
pub const MESSAGE_LOG_CAP: usize = 1000;

/// Identity bound to a connection.
///
/// Registered identities carry a stable id across sessions; anonymous
/// identities live only as long as the process and are never persisted by
/// the gateway. Immutable for the lifetime of a connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: String,
    pub display_name: String,
    pub anonymous: bool,
}

impl Identity {
    pub fn registered(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            anonymous: false,
        }
    }

    pub fn anonymous(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            anonymous: true,
        }
    }
}

/// Record of a registered user in the durable store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: String,
    pub display_name: String,
}

/// A single chat message. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub author_id: String,
    pub author_name: String,
    pub content: MessageContent,
    /// Whether the author was a registered (non-anonymous) identity.
    pub registered: bool,
    pub created_at: Timestamp,
}

impl ChatMessage {
    pub fn new(author: &Identity, content: MessageContent, created_at: Timestamp) -> Self {
        Self {
            author_id: author.id.clone(),
            author_name: author.display_name.clone(),
            content,
            registered: !author.anonymous,
            created_at,
        }
    }
}

/// Display metadata for a topic, resolved from the catalog or degraded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomMetadata {
    pub display_name: String,
    pub art_url: Option<String>,
}

impl RoomMetadata {
    /// Deterministic degraded metadata for a topic the catalog could not
    /// resolve. Repeated failures must yield the same name.
    pub fn unknown(topic_id: &TopicId) -> Self {
        Self {
            display_name: format!("Unknown Game {}", topic_id.as_str()),
            art_url: None,
        }
    }

    /// True when the display name is still the degraded placeholder.
    pub fn is_placeholder(display_name: &str) -> bool {
        display_name.is_empty() || display_name.starts_with("Unknown Game ")
    }
}

/// A per-topic chat room with a bounded message log.
///
/// Rooms are created lazily on first join or first message, never deleted,
/// and only archived by housekeeping after a period of inactivity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub topic_id: TopicId,
    pub display_name: String,
    pub art_url: Option<String>,
    /// Ordered oldest-first, newest last.
    pub messages: Vec<ChatMessage>,
    pub last_active: Timestamp,
    pub archived: bool,
}

impl Room {
    pub fn new(topic_id: TopicId, metadata: RoomMetadata, created_at: Timestamp) -> Self {
        Self {
            topic_id,
            display_name: metadata.display_name,
            art_url: metadata.art_url,
            messages: Vec::new(),
            last_active: created_at,
            archived: false,
        }
    }

    /// Append a message, evicting the oldest entry once the log is at
    /// capacity. Refreshes `last_active` and clears the archive flag.
    pub fn push_message(&mut self, message: ChatMessage) {
        self.last_active = message.created_at;
        self.archived = false;
        self.messages.push(message);
        if self.messages.len() > MESSAGE_LOG_CAP {
            let excess = self.messages.len() - MESSAGE_LOG_CAP;
            self.messages.drain(..excess);
        }
    }

    /// The newest `limit` messages, oldest first (a suffix of the log).
    pub fn recent_messages(&self, limit: usize) -> &[ChatMessage] {
        let start = self.messages.len().saturating_sub(limit);
        &self.messages[start..]
    }

    /// Replace display metadata without touching the message log.
    pub fn backfill_metadata(&mut self, metadata: RoomMetadata) {
        self.display_name = metadata.display_name;
        self.art_url = metadata.art_url;
    }
}

/// Listing projection of a room for the active-rooms endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomSummary {
    pub topic_id: TopicId,
    pub display_name: String,
    pub art_url: Option<String>,
    pub last_active: Timestamp,
    pub message_count: usize,
}
