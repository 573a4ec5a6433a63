//! Storage traits the domain needs from the outside world.
//!
//! The use case layer depends on these traits; the infrastructure layer
//! provides the concrete implementations (dependency inversion). The
//! in-memory implementations stand in for the durable store and the shared
//! cache of a production deployment behind the same interface.

use std::time::Duration;

use async_trait::async_trait;

use super::{
    entity::{ChatMessage, Room, RoomMetadata, RoomSummary, UserRecord},
    error::StoreError,
    value_object::{Timestamp, TopicId},
};

/// Durable store of room documents keyed uniquely by topic id.
#[async_trait]
pub trait RoomStore: Send + Sync {
    /// Fetch the room for a topic, if it exists.
    async fn get(&self, topic_id: &TopicId) -> Result<Option<Room>, StoreError>;

    /// Return the existing room or atomically create one with the supplied
    /// metadata. The creation is an upsert keyed by topic id: concurrent
    /// first-joins for the same topic must resolve to a single room, and on
    /// a race the existing room wins (the supplied metadata is discarded).
    async fn get_or_create(
        &self,
        topic_id: &TopicId,
        metadata: RoomMetadata,
        now: Timestamp,
    ) -> Result<Room, StoreError>;

    /// Append a message, trimming the log to its cap, refreshing
    /// `last_active` and clearing the archive flag. Upserts the room if it
    /// does not exist yet (a send can create a room with no prior join).
    async fn append_message(
        &self,
        topic_id: &TopicId,
        message: ChatMessage,
    ) -> Result<Room, StoreError>;

    /// At most `limit` newest messages, oldest first. A missing room yields
    /// an empty list, not an error.
    async fn recent_messages(
        &self,
        topic_id: &TopicId,
        limit: usize,
    ) -> Result<Vec<ChatMessage>, StoreError>;

    /// Update display metadata without touching the message log. A missing
    /// room is a no-op.
    async fn backfill_metadata(
        &self,
        topic_id: &TopicId,
        metadata: RoomMetadata,
    ) -> Result<(), StoreError>;

    /// Non-archived rooms active since the cutoff, sorted by message count
    /// descending, then last-active descending.
    async fn active_rooms(
        &self,
        since: Timestamp,
        limit: usize,
    ) -> Result<Vec<RoomSummary>, StoreError>;

    /// Archive rooms whose last activity is older than the threshold.
    /// Returns the number of rooms archived.
    async fn archive_inactive(&self, threshold: Timestamp) -> Result<usize, StoreError>;
}

/// Durable store of registered users.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find(&self, user_id: &str) -> Result<Option<UserRecord>, StoreError>;
}

/// Shared key-value cache with per-entry time-to-live.
///
/// Used for topic metadata (7-day TTL) and anonymous rate-limit records
/// (60-second TTL, self-cleaning).
#[async_trait]
pub trait KeyValueCache: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), StoreError>;

    async fn delete(&self, key: &str) -> Result<(), StoreError>;
}
