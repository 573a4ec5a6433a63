//! Join a room: create it on first entry, move the member in, and gather
//! everything the handler must emit (history, member list, occupancy, and
//! the presence of any room vacated on the way in).

use std::sync::Arc;

use pixelchat_shared::time::Clock;

use crate::domain::{
    ChatMessage, Identity, MessagePusher, RoomStore, Timestamp, TopicId,
};

use super::error::GatewayError;
use super::metadata::MetadataResolver;
use super::presence::{MembershipTracker, PresenceView};

/// Number of history entries replayed to a joining member.
pub const JOIN_HISTORY_LIMIT: usize = 999;

/// Everything emitted after a successful join.
#[derive(Debug, Clone)]
pub struct JoinOutcome {
    pub topic_id: TopicId,
    pub history: Vec<ChatMessage>,
    pub members: Vec<Identity>,
    pub count: usize,
    /// Presence of the room the member implicitly left, if any.
    pub vacated: Option<PresenceView>,
}

pub struct JoinRoomUseCase {
    store: Arc<dyn RoomStore>,
    tracker: Arc<MembershipTracker>,
    metadata: Arc<MetadataResolver>,
    pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl JoinRoomUseCase {
    pub fn new(
        store: Arc<dyn RoomStore>,
        tracker: Arc<MembershipTracker>,
        metadata: Arc<MetadataResolver>,
        pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            tracker,
            metadata,
            pusher,
            clock,
        }
    }

    pub async fn execute(
        &self,
        identity: &Identity,
        raw_topic: &str,
    ) -> Result<JoinOutcome, GatewayError> {
        let topic_id = TopicId::new(raw_topic)?;

        // Metadata is only resolved when the room does not exist yet, so
        // the catalog is off the hot path for established rooms.
        if self.store.get(&topic_id).await?.is_none() {
            let metadata = self.metadata.resolve(&topic_id).await;
            let now = Timestamp::new(self.clock.now_millis());
            self.store.get_or_create(&topic_id, metadata, now).await?;
        }

        let shift = self.tracker.join(&topic_id, &identity.id).await;

        let history = self
            .store
            .recent_messages(&topic_id, JOIN_HISTORY_LIMIT)
            .await?;

        let member_ids = self.tracker.members(&topic_id).await;
        let members = self.pusher.connected_identities(&member_ids).await;

        let vacated = match shift.left {
            Some(vacated) => {
                let remaining_ids = self.tracker.members(&vacated.topic_id).await;
                let remaining = self.pusher.connected_identities(&remaining_ids).await;
                Some(PresenceView {
                    topic_id: vacated.topic_id,
                    members: remaining,
                    count: vacated.remaining,
                })
            }
            None => None,
        };

        tracing::info!(
            "'{}' joined room '{}' ({} present)",
            identity.display_name,
            topic_id,
            shift.count
        );

        Ok(JoinOutcome {
            topic_id,
            history,
            members,
            count: shift.count,
            vacated,
        })
    }
}
