//! Accept a message: validate, gate through the rate limiter, persist, and
//! name the connections the broadcast must reach.

use std::sync::Arc;

use pixelchat_shared::time::Clock;

use crate::domain::{ChatMessage, Identity, RoomStore, Timestamp, TopicId};

use super::error::GatewayError;
use super::presence::MembershipTracker;
use super::rate_limit::RateLimiter;

/// A persisted message and the member ids it must be pushed to.
#[derive(Debug, Clone)]
pub struct SendOutcome {
    pub topic_id: TopicId,
    pub message: ChatMessage,
    pub targets: Vec<String>,
}

pub struct SendMessageUseCase {
    store: Arc<dyn RoomStore>,
    tracker: Arc<MembershipTracker>,
    limiter: Arc<RateLimiter>,
    clock: Arc<dyn Clock>,
}

impl SendMessageUseCase {
    pub fn new(
        store: Arc<dyn RoomStore>,
        tracker: Arc<MembershipTracker>,
        limiter: Arc<RateLimiter>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            tracker,
            limiter,
            clock,
        }
    }

    /// Validation runs before the limiter so a malformed attempt does not
    /// consume the sender's window.
    pub async fn execute(
        &self,
        identity: &Identity,
        raw_topic: &str,
        raw_content: &str,
    ) -> Result<SendOutcome, GatewayError> {
        let topic_id = TopicId::new(raw_topic)?;
        let content = crate::domain::MessageContent::new(raw_content)?;

        self.limiter.check(identity).await?;

        let created_at = Timestamp::new(self.clock.now_millis());
        let message = ChatMessage::new(identity, content, created_at);
        self.store.append_message(&topic_id, message.clone()).await?;

        let targets = self.tracker.members(&topic_id).await;

        tracing::debug!(
            "'{}' sent {} chars to room '{}' ({} recipients)",
            identity.display_name,
            message.content.as_str().chars().count(),
            topic_id,
            targets.len()
        );

        Ok(SendOutcome {
            topic_id,
            message,
            targets,
        })
    }
}
