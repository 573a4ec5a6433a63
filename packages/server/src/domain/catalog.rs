//! Catalog service interface for topic display metadata.

use async_trait::async_trait;
use thiserror::Error;

use super::entity::RoomMetadata;

/// Failures querying the external catalog service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("catalog request failed: {0}")]
    Http(String),
    #[error("catalog request timed out")]
    Timeout,
    #[error("catalog response was malformed: {0}")]
    Malformed(String),
    #[error("catalog has no data for this topic")]
    Missing,
}

/// External catalog lookup of topic display metadata.
///
/// Callers must treat every error as non-fatal: metadata resolution degrades
/// to a placeholder instead of blocking the join/send flow.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogClient: Send + Sync {
    async fn fetch(&self, topic_id: &str) -> Result<RoomMetadata, CatalogError>;
}
