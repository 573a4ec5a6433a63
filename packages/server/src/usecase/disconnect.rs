//! Connection teardown: unregister the push channel, drop the membership,
//! and clear the sender's cooldown record.

use std::sync::Arc;

use crate::domain::{Identity, MessagePusher};

use super::presence::{MembershipTracker, PresenceView};
use super::rate_limit::RateLimiter;

pub struct DisconnectUseCase {
    tracker: Arc<MembershipTracker>,
    limiter: Arc<RateLimiter>,
    pusher: Arc<dyn MessagePusher>,
}

impl DisconnectUseCase {
    pub fn new(
        tracker: Arc<MembershipTracker>,
        limiter: Arc<RateLimiter>,
        pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            tracker,
            limiter,
            pusher,
        }
    }

    /// Tear down a connection. Returns the presence of the room the
    /// identity was in, so the handler can notify the remaining members.
    ///
    /// Infallible: each cleanup step runs regardless of the others.
    pub async fn execute(&self, identity: &Identity) -> Option<PresenceView> {
        self.pusher.unregister_client(&identity.id).await;

        // The record would expire on its own; failure here is only noise.
        if let Err(e) = self.limiter.clear(identity).await {
            tracing::warn!(
                "Failed to clear rate-limit record for '{}': {}",
                identity.id,
                e
            );
        }

        let vacated = self.tracker.leave_current(&identity.id).await?;
        let remaining_ids = self.tracker.members(&vacated.topic_id).await;
        let members = self.pusher.connected_identities(&remaining_ids).await;

        tracing::info!(
            "'{}' disconnected from room '{}' ({} remain)",
            identity.display_name,
            vacated.topic_id,
            vacated.remaining
        );

        Some(PresenceView {
            topic_id: vacated.topic_id,
            members,
            count: vacated.remaining,
        })
    }
}
