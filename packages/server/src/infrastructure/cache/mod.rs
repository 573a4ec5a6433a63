//! Key-value cache implementations.

pub mod inmemory;

pub use inmemory::InMemoryCache;
