//! Cache-aside resolution of topic display metadata.
//!
//! Metadata resolution must never block the join/send flow on an external
//! outage: any catalog failure degrades to a deterministic placeholder.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::{CatalogClient, KeyValueCache, RoomMetadata, TopicId};

/// TTL of a cached metadata entry: 7 days.
pub const METADATA_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

fn cache_key(topic_id: &TopicId) -> String {
    format!("game:{}", topic_id.as_str())
}

/// Cached wire form of a metadata entry.
#[derive(Debug, Serialize, Deserialize)]
struct CachedMetadata {
    name: String,
    logo_url: Option<String>,
}

/// Cache-aside metadata lookup backed by the catalog service.
pub struct MetadataResolver {
    cache: Arc<dyn KeyValueCache>,
    catalog: Arc<dyn CatalogClient>,
}

impl MetadataResolver {
    pub fn new(cache: Arc<dyn KeyValueCache>, catalog: Arc<dyn CatalogClient>) -> Self {
        Self { cache, catalog }
    }

    /// Resolve display metadata for a topic. Infallible: cache misses fall
    /// through to the catalog, and catalog failures fall back to
    /// `Unknown Game <topic>`.
    pub async fn resolve(&self, topic_id: &TopicId) -> RoomMetadata {
        let key = cache_key(topic_id);

        match self.cache.get(&key).await {
            Ok(Some(raw)) => match serde_json::from_str::<CachedMetadata>(&raw) {
                Ok(cached) => {
                    return RoomMetadata {
                        display_name: cached.name,
                        art_url: cached.logo_url,
                    };
                }
                Err(e) => {
                    tracing::warn!("Discarding unparseable metadata cache entry '{}': {}", key, e);
                }
            },
            Ok(None) => {}
            Err(e) => {
                tracing::warn!("Metadata cache read failed for '{}': {}", key, e);
            }
        }

        match self.catalog.fetch(topic_id.as_str()).await {
            Ok(metadata) => {
                let cached = CachedMetadata {
                    name: metadata.display_name.clone(),
                    logo_url: metadata.art_url.clone(),
                };
                match serde_json::to_string(&cached) {
                    Ok(serialized) => {
                        if let Err(e) = self.cache.set(&key, serialized, METADATA_TTL).await {
                            tracing::warn!("Failed to cache metadata for '{}': {}", topic_id, e);
                        }
                    }
                    Err(e) => {
                        tracing::warn!("Failed to serialize metadata for '{}': {}", topic_id, e);
                    }
                }
                metadata
            }
            Err(e) => {
                tracing::warn!("Catalog lookup failed for '{}', degrading: {}", topic_id, e);
                RoomMetadata::unknown(topic_id)
            }
        }
    }
}
