//! Infrastructure layer: concrete implementations of the domain's outward
//! traits (stores, cache, catalog client, message pusher) plus the DTOs of
//! the wire protocol.

pub mod cache;
pub mod catalog;
pub mod dto;
pub mod message_pusher;
pub mod repository;
