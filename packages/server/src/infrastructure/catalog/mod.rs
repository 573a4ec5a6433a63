//! Catalog client implementations.

pub mod steam;

pub use steam::SteamCatalogClient;
