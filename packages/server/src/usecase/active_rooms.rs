//! Active room listing for the lobby: the busiest recent rooms, with live
//! occupancy and lazily repaired metadata.

use std::sync::Arc;
use std::time::Duration;

use pixelchat_shared::time::Clock;

use crate::domain::{RoomMetadata, RoomStore, Timestamp, TopicId};

use super::error::GatewayError;
use super::metadata::MetadataResolver;
use super::presence::MembershipTracker;

/// Activity window for the listing: 24 hours.
const ACTIVE_WINDOW: Duration = Duration::from_secs(24 * 60 * 60);

/// Number of rooms returned.
const ACTIVE_LIMIT: usize = 6;

/// One row of the lobby listing.
#[derive(Debug, Clone)]
pub struct ActiveRoomView {
    pub topic_id: TopicId,
    pub display_name: String,
    pub art_url: Option<String>,
    pub message_count: usize,
    pub user_count: usize,
    pub last_active: Timestamp,
}

pub struct ActiveRoomsUseCase {
    store: Arc<dyn RoomStore>,
    tracker: Arc<MembershipTracker>,
    metadata: Arc<MetadataResolver>,
    clock: Arc<dyn Clock>,
}

impl ActiveRoomsUseCase {
    pub fn new(
        store: Arc<dyn RoomStore>,
        tracker: Arc<MembershipTracker>,
        metadata: Arc<MetadataResolver>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            tracker,
            metadata,
            clock,
        }
    }

    pub async fn execute(&self) -> Result<Vec<ActiveRoomView>, GatewayError> {
        let since =
            Timestamp::new(self.clock.now_millis() - ACTIVE_WINDOW.as_millis() as i64);
        let summaries = self.store.active_rooms(since, ACTIVE_LIMIT).await?;

        let mut views = Vec::with_capacity(summaries.len());
        for summary in summaries {
            let (display_name, art_url) = self
                .repair_metadata(&summary.topic_id, summary.display_name, summary.art_url)
                .await;
            let user_count = self.tracker.count(&summary.topic_id).await;
            views.push(ActiveRoomView {
                topic_id: summary.topic_id,
                display_name,
                art_url,
                message_count: summary.message_count,
                user_count,
                last_active: summary.last_active,
            });
        }
        Ok(views)
    }

    /// Re-resolve metadata for rooms stuck on a placeholder name or missing
    /// art, persisting the repair only when the catalog produced something
    /// better than another placeholder.
    async fn repair_metadata(
        &self,
        topic_id: &TopicId,
        display_name: String,
        art_url: Option<String>,
    ) -> (String, Option<String>) {
        if !RoomMetadata::is_placeholder(&display_name) && art_url.is_some() {
            return (display_name, art_url);
        }

        let resolved = self.metadata.resolve(topic_id).await;
        if RoomMetadata::is_placeholder(&resolved.display_name) {
            return (display_name, art_url);
        }

        if let Err(e) = self.store.backfill_metadata(topic_id, resolved.clone()).await {
            tracing::warn!("Failed to backfill metadata for '{}': {}", topic_id, e);
        }
        (resolved.display_name, resolved.art_url)
    }
}
