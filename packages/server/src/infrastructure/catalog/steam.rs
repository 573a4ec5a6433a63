//! Catalog client against the Steam storefront appdetails endpoint.
//!
//! Response shape: a map keyed by the requested app id, each entry carrying
//! a `success` flag and, when successful, a `data` object with the app's
//! name and header image.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::{CatalogClient, CatalogError, RoomMetadata};

#[derive(Debug, Deserialize)]
struct AppEntry {
    success: bool,
    data: Option<AppData>,
}

#[derive(Debug, Deserialize)]
struct AppData {
    name: String,
    header_image: Option<String>,
}

pub struct SteamCatalogClient {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl SteamCatalogClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            timeout,
        }
    }
}

#[async_trait]
impl CatalogClient for SteamCatalogClient {
    async fn fetch(&self, topic_id: &str) -> Result<RoomMetadata, CatalogError> {
        let url = format!("{}/api/appdetails?appids={}", self.base_url, topic_id);

        let response = tokio::time::timeout(self.timeout, self.http.get(&url).send())
            .await
            .map_err(|_| CatalogError::Timeout)?
            .map_err(|e| CatalogError::Http(e.to_string()))?;

        if !response.status().is_success() {
            return Err(CatalogError::Http(format!(
                "unexpected status {}",
                response.status()
            )));
        }

        let body: HashMap<String, AppEntry> = response
            .json()
            .await
            .map_err(|e| CatalogError::Malformed(e.to_string()))?;

        let entry = body.get(topic_id).ok_or(CatalogError::Missing)?;
        if !entry.success {
            return Err(CatalogError::Missing);
        }
        let data = entry.data.as_ref().ok_or(CatalogError::Missing)?;

        Ok(RoomMetadata {
            display_name: data.name.clone(),
            art_url: data.header_image.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_shape_parses() {
        // given: the documented appdetails shape
        let raw = r#"{
            "440": {
                "success": true,
                "data": {
                    "name": "Team Fortress 2",
                    "header_image": "https://cdn.example/440.jpg",
                    "type": "game"
                }
            }
        }"#;

        // when:
        let body: HashMap<String, AppEntry> = serde_json::from_str(raw).unwrap();

        // then:
        let entry = body.get("440").unwrap();
        assert!(entry.success);
        let data = entry.data.as_ref().unwrap();
        assert_eq!(data.name, "Team Fortress 2");
        assert_eq!(
            data.header_image,
            Some("https://cdn.example/440.jpg".to_string())
        );
    }

    #[test]
    fn test_unsuccessful_entry_parses_without_data() {
        // given: an unknown app id
        let raw = r#"{"999999": {"success": false}}"#;

        // when:
        let body: HashMap<String, AppEntry> = serde_json::from_str(raw).unwrap();

        // then:
        let entry = body.get("999999").unwrap();
        assert!(!entry.success);
        assert!(entry.data.is_none());
    }
}
