//! Use case layer: one struct per gateway operation plus the leaf services
//! (identity binding, rate limiting, metadata resolution) and the
//! membership tracker.

pub mod active_rooms;
pub mod disconnect;
pub mod error;
pub mod housekeeping;
pub mod identity;
pub mod join_room;
pub mod metadata;
pub mod presence;
pub mod rate_limit;
pub mod send_message;

pub use active_rooms::{ActiveRoomView, ActiveRoomsUseCase};
pub use disconnect::DisconnectUseCase;
pub use error::GatewayError;
pub use housekeeping::ArchiveInactiveUseCase;
pub use identity::IdentityBinder;
pub use join_room::{JoinOutcome, JoinRoomUseCase, JOIN_HISTORY_LIMIT};
pub use metadata::MetadataResolver;
pub use presence::{MembershipTracker, PresenceView};
pub use rate_limit::RateLimiter;
pub use send_message::{SendMessageUseCase, SendOutcome};
