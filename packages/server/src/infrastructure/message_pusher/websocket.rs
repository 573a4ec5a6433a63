//! WebSocket-backed message pusher and connection registry.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{Identity, MessagePusher, PushError, PusherChannel};

struct ClientConnection {
    identity: Identity,
    sender: PusherChannel,
}

/// Registry of live connections keyed by identity id.
#[derive(Default)]
pub struct WebSocketMessagePusher {
    clients: Mutex<HashMap<String, ClientConnection>>,
}

impl WebSocketMessagePusher {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, identity: Identity, sender: PusherChannel) {
        let mut clients = self.clients.lock().await;
        let identity_id = identity.id.clone();
        clients.insert(identity_id.clone(), ClientConnection { identity, sender });
        tracing::debug!("Client '{}' registered to MessagePusher", identity_id);
    }

    async fn unregister_client(&self, identity_id: &str) {
        let mut clients = self.clients.lock().await;
        clients.remove(identity_id);
        tracing::debug!("Client '{}' unregistered from MessagePusher", identity_id);
    }

    async fn is_registered(&self, identity_id: &str) -> bool {
        let clients = self.clients.lock().await;
        clients.contains_key(identity_id)
    }

    async fn push_to(&self, identity_id: &str, content: &str) -> Result<(), PushError> {
        let clients = self.clients.lock().await;

        if let Some(connection) = clients.get(identity_id) {
            connection
                .sender
                .send(content.to_string())
                .map_err(|e| PushError::PushFailed(e.to_string()))?;
            tracing::debug!("Pushed message to client '{}'", identity_id);
            Ok(())
        } else {
            Err(PushError::ClientNotFound(identity_id.to_string()))
        }
    }

    async fn broadcast(&self, targets: &[String], content: &str) -> Result<(), PushError> {
        let clients = self.clients.lock().await;

        for target in targets {
            if let Some(connection) = clients.get(target) {
                // partial failure is tolerated on broadcast
                if let Err(e) = connection.sender.send(content.to_string()) {
                    tracing::warn!("Failed to push message to client '{}': {}", target, e);
                } else {
                    tracing::debug!("Broadcasted message to client '{}'", target);
                }
            } else {
                tracing::warn!("Client '{}' not found during broadcast, skipping", target);
            }
        }

        Ok(())
    }

    async fn connected_identities(&self, identity_ids: &[String]) -> Vec<Identity> {
        let clients = self.clients.lock().await;
        identity_ids
            .iter()
            .filter_map(|id| clients.get(id).map(|c| c.identity.clone()))
            .collect()
    }
}
