//! Message push interface for delivering events to connected clients.

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{entity::Identity, error::PushError};

/// Channel used to hand serialized frames to a connection's write task.
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// Delivery of serialized events to live connections.
///
/// The UI layer creates the WebSocket and its sender channel; this interface
/// owns the registry of live senders and performs delivery. It doubles as
/// the connection registry: the identities of live connections are resolved
/// through it when building member lists.
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// Register a newly bound connection.
    async fn register_client(&self, identity: Identity, sender: PusherChannel);

    /// Remove a connection from the registry.
    async fn unregister_client(&self, identity_id: &str);

    /// Whether a connection with this identity id is currently registered.
    async fn is_registered(&self, identity_id: &str) -> bool;

    /// Push a frame to a single client.
    async fn push_to(&self, identity_id: &str, content: &str) -> Result<(), PushError>;

    /// Push a frame to each target, tolerating partial failure: targets that
    /// are gone or whose channel is closed are skipped with a warning.
    async fn broadcast(&self, targets: &[String], content: &str) -> Result<(), PushError>;

    /// Resolve the identities of the given ids that are currently connected,
    /// in the order of the input ids.
    async fn connected_identities(&self, identity_ids: &[String]) -> Vec<Identity>;
}
