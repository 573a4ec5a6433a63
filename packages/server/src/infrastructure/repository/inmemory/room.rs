//! In-memory room store.
//!
//! One mutex over the whole map: each trait method is a single critical
//! section, which is what makes `get_or_create` an atomic upsert.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ChatMessage, Room, RoomMetadata, RoomStore, RoomSummary, StoreError, Timestamp, TopicId,
};

#[derive(Default)]
pub struct InMemoryRoomStore {
    rooms: Mutex<HashMap<TopicId, Room>>,
}

impl InMemoryRoomStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoomStore for InMemoryRoomStore {
    async fn get(&self, topic_id: &TopicId) -> Result<Option<Room>, StoreError> {
        let rooms = self.rooms.lock().await;
        Ok(rooms.get(topic_id).cloned())
    }

    async fn get_or_create(
        &self,
        topic_id: &TopicId,
        metadata: RoomMetadata,
        now: Timestamp,
    ) -> Result<Room, StoreError> {
        let mut rooms = self.rooms.lock().await;
        let room = rooms
            .entry(topic_id.clone())
            .or_insert_with(|| Room::new(topic_id.clone(), metadata, now));
        Ok(room.clone())
    }

    async fn append_message(
        &self,
        topic_id: &TopicId,
        message: ChatMessage,
    ) -> Result<Room, StoreError> {
        let mut rooms = self.rooms.lock().await;
        let room = rooms.entry(topic_id.clone()).or_insert_with(|| {
            Room::new(
                topic_id.clone(),
                RoomMetadata::unknown(topic_id),
                message.created_at,
            )
        });
        room.push_message(message);
        Ok(room.clone())
    }

    async fn recent_messages(
        &self,
        topic_id: &TopicId,
        limit: usize,
    ) -> Result<Vec<ChatMessage>, StoreError> {
        let rooms = self.rooms.lock().await;
        Ok(rooms
            .get(topic_id)
            .map(|room| room.recent_messages(limit).to_vec())
            .unwrap_or_default())
    }

    async fn backfill_metadata(
        &self,
        topic_id: &TopicId,
        metadata: RoomMetadata,
    ) -> Result<(), StoreError> {
        let mut rooms = self.rooms.lock().await;
        if let Some(room) = rooms.get_mut(topic_id) {
            room.backfill_metadata(metadata);
        }
        Ok(())
    }

    async fn active_rooms(
        &self,
        since: Timestamp,
        limit: usize,
    ) -> Result<Vec<RoomSummary>, StoreError> {
        let rooms = self.rooms.lock().await;
        let mut summaries: Vec<RoomSummary> = rooms
            .values()
            .filter(|room| !room.archived && room.last_active >= since)
            .map(|room| RoomSummary {
                topic_id: room.topic_id.clone(),
                display_name: room.display_name.clone(),
                art_url: room.art_url.clone(),
                last_active: room.last_active,
                message_count: room.messages.len(),
            })
            .collect();
        summaries.sort_by(|a, b| {
            b.message_count
                .cmp(&a.message_count)
                .then(b.last_active.cmp(&a.last_active))
        });
        summaries.truncate(limit);
        Ok(summaries)
    }

    async fn archive_inactive(&self, threshold: Timestamp) -> Result<usize, StoreError> {
        let mut rooms = self.rooms.lock().await;
        let mut archived = 0;
        for room in rooms.values_mut() {
            if !room.archived && room.last_active < threshold {
                room.archived = true;
                archived += 1;
            }
        }
        Ok(archived)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Identity, MessageContent, MESSAGE_LOG_CAP};

    fn topic(raw: &str) -> TopicId {
        TopicId::new(raw).unwrap()
    }

    fn metadata(name: &str) -> RoomMetadata {
        RoomMetadata {
            display_name: name.to_string(),
            art_url: None,
        }
    }

    fn message(content: &str, at: i64) -> ChatMessage {
        ChatMessage::new(
            &Identity::anonymous("conn-1", "HappyGamer1"),
            MessageContent::new(content).unwrap(),
            Timestamp::new(at),
        )
    }

    #[tokio::test]
    async fn test_get_or_create_is_an_idempotent_upsert() {
        // given: an existing room
        let store = InMemoryRoomStore::new();
        let first = store
            .get_or_create(&topic("440"), metadata("Team Fortress 2"), Timestamp::new(1))
            .await
            .unwrap();

        // when: a second create with different metadata
        let second = store
            .get_or_create(&topic("440"), metadata("Imposter"), Timestamp::new(2))
            .await
            .unwrap();

        // then: the existing room wins, the new metadata is discarded
        assert_eq!(second.display_name, "Team Fortress 2");
        assert_eq!(second, first);
    }

    #[tokio::test]
    async fn test_append_message_creates_a_missing_room() {
        // given:
        let store = InMemoryRoomStore::new();

        // when: a send without a prior join
        let room = store
            .append_message(&topic("440"), message("hello", 100))
            .await
            .unwrap();

        // then: the room exists with placeholder metadata
        assert_eq!(room.display_name, "Unknown Game 440");
        assert_eq!(room.messages.len(), 1);
        assert_eq!(room.last_active, Timestamp::new(100));
    }

    #[tokio::test]
    async fn test_append_message_trims_to_the_cap() {
        // given: a room at capacity
        let store = InMemoryRoomStore::new();
        for n in 0..MESSAGE_LOG_CAP {
            store
                .append_message(&topic("440"), message(&format!("m{}", n), n as i64))
                .await
                .unwrap();
        }

        // when:
        let room = store
            .append_message(&topic("440"), message("newest", MESSAGE_LOG_CAP as i64))
            .await
            .unwrap();

        // then:
        assert_eq!(room.messages.len(), MESSAGE_LOG_CAP);
        assert_eq!(room.messages[0].content.as_str(), "m1");
        assert_eq!(room.messages.last().unwrap().content.as_str(), "newest");
    }

    #[tokio::test]
    async fn test_recent_messages_of_a_missing_room_is_empty() {
        // given:
        let store = InMemoryRoomStore::new();

        // when / then:
        assert!(store
            .recent_messages(&topic("440"), 50)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_recent_messages_respects_the_limit() {
        // given:
        let store = InMemoryRoomStore::new();
        for n in 0..10 {
            store
                .append_message(&topic("440"), message(&format!("m{}", n), n))
                .await
                .unwrap();
        }

        // when:
        let recent = store.recent_messages(&topic("440"), 3).await.unwrap();

        // then: the newest three, oldest first
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].content.as_str(), "m7");
        assert_eq!(recent[2].content.as_str(), "m9");
    }

    #[tokio::test]
    async fn test_backfill_metadata_keeps_the_log() {
        // given:
        let store = InMemoryRoomStore::new();
        store
            .append_message(&topic("440"), message("hello", 1))
            .await
            .unwrap();

        // when:
        store
            .backfill_metadata(&topic("440"), metadata("Team Fortress 2"))
            .await
            .unwrap();

        // then:
        let room = store.get(&topic("440")).await.unwrap().unwrap();
        assert_eq!(room.display_name, "Team Fortress 2");
        assert_eq!(room.messages.len(), 1);
    }

    #[tokio::test]
    async fn test_active_rooms_orders_by_message_count_then_recency() {
        // given: three rooms with different traffic
        let store = InMemoryRoomStore::new();
        for n in 0..3 {
            store
                .append_message(&topic("440"), message(&format!("m{}", n), 100))
                .await
                .unwrap();
        }
        store
            .append_message(&topic("570"), message("m", 200))
            .await
            .unwrap();
        store
            .append_message(&topic("730"), message("m", 150))
            .await
            .unwrap();

        // when:
        let summaries = store.active_rooms(Timestamp::new(0), 6).await.unwrap();

        // then: busiest first, ties broken by last activity
        let topics: Vec<_> = summaries.iter().map(|s| s.topic_id.as_str()).collect();
        assert_eq!(topics, vec!["440", "570", "730"]);
    }

    #[tokio::test]
    async fn test_active_rooms_excludes_stale_and_archived() {
        // given: a stale room and an archived room
        let store = InMemoryRoomStore::new();
        store
            .append_message(&topic("440"), message("old", 10))
            .await
            .unwrap();
        store
            .append_message(&topic("570"), message("fresh", 100))
            .await
            .unwrap();
        store.archive_inactive(Timestamp::new(50)).await.unwrap();

        // when: cutoff above the stale room's activity
        let summaries = store.active_rooms(Timestamp::new(50), 6).await.unwrap();

        // then: only the fresh room remains
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].topic_id, topic("570"));
    }

    #[tokio::test]
    async fn test_active_rooms_truncates_to_the_limit() {
        // given: four rooms
        let store = InMemoryRoomStore::new();
        for raw in ["1", "2", "3", "4"] {
            store
                .append_message(&topic(raw), message("m", 100))
                .await
                .unwrap();
        }

        // when:
        let summaries = store.active_rooms(Timestamp::new(0), 2).await.unwrap();

        // then:
        assert_eq!(summaries.len(), 2);
    }

    #[tokio::test]
    async fn test_archive_inactive_counts_transitions_only() {
        // given: one idle room, one fresh
        let store = InMemoryRoomStore::new();
        store
            .append_message(&topic("440"), message("old", 10))
            .await
            .unwrap();
        store
            .append_message(&topic("570"), message("fresh", 100))
            .await
            .unwrap();

        // when:
        let first = store.archive_inactive(Timestamp::new(50)).await.unwrap();
        let second = store.archive_inactive(Timestamp::new(50)).await.unwrap();

        // then: only the first pass archives anything
        assert_eq!(first, 1);
        assert_eq!(second, 0);
    }

    #[tokio::test]
    async fn test_new_message_unarchives_a_room() {
        // given: an archived room
        let store = InMemoryRoomStore::new();
        store
            .append_message(&topic("440"), message("old", 10))
            .await
            .unwrap();
        store.archive_inactive(Timestamp::new(50)).await.unwrap();

        // when:
        store
            .append_message(&topic("440"), message("back", 100))
            .await
            .unwrap();

        // then:
        let room = store.get(&topic("440")).await.unwrap().unwrap();
        assert!(!room.archived);
    }
}
