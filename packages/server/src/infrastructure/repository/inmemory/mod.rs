//! In-memory store implementations backed by `HashMap`.
//!
//! These stand in for the durable document store of a production
//! deployment. A DBMS-backed implementation would add a conversion layer
//! (row/JSON to domain model) behind the same traits.

pub mod room;
pub mod user;

pub use room::InMemoryRoomStore;
pub use user::InMemoryUserStore;
