//! Domain layer: entities, value objects and the interfaces the gateway
//! needs from the outside world (dependency inversion).

pub mod catalog;
pub mod entity;
pub mod error;
pub mod pusher;
pub mod store;
pub mod value_object;

pub use catalog::{CatalogClient, CatalogError};
pub use entity::{
    ChatMessage, Identity, Room, RoomMetadata, RoomSummary, UserRecord, MESSAGE_LOG_CAP,
};
pub use error::{DomainError, PushError, StoreError};
pub use pusher::{MessagePusher, PusherChannel};
pub use store::{KeyValueCache, RoomStore, UserStore};
pub use value_object::{MessageContent, Timestamp, TopicId};

#[cfg(test)]
pub use catalog::MockCatalogClient;
