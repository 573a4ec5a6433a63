//! In-memory TTL cache.
//!
//! Expiry is lazy: an entry past its deadline is dropped on the read that
//! observes it. The injected clock keeps expiry testable without sleeping.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use pixelchat_shared::time::Clock;

use crate::domain::{KeyValueCache, StoreError};

struct CacheEntry {
    value: String,
    expires_at_millis: i64,
}

pub struct InMemoryCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryCache {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            clock,
        }
    }
}

#[async_trait]
impl KeyValueCache for InMemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut entries = self.entries.lock().await;
        match entries.get(key) {
            Some(entry) if entry.expires_at_millis > self.clock.now_millis() => {
                Ok(Some(entry.value.clone()))
            }
            Some(_) => {
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().await;
        entries.insert(
            key.to_string(),
            CacheEntry {
                value,
                expires_at_millis: self.clock.now_millis() + ttl.as_millis() as i64,
            },
        );
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().await;
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixelchat_shared::time::FixedClock;
    use std::sync::atomic::{AtomicI64, Ordering};

    struct SteppingClock {
        now: AtomicI64,
    }

    impl SteppingClock {
        fn new(start: i64) -> Self {
            Self {
                now: AtomicI64::new(start),
            }
        }

        fn advance(&self, millis: i64) {
            self.now.fetch_add(millis, Ordering::SeqCst);
        }
    }

    impl Clock for SteppingClock {
        fn now_millis(&self) -> i64 {
            self.now.load(Ordering::SeqCst)
        }
    }

    #[tokio::test]
    async fn test_set_then_get_within_ttl() {
        // given:
        let cache = InMemoryCache::new(Arc::new(FixedClock::new(1_000)));

        // when:
        cache
            .set("k", "v".to_string(), Duration::from_secs(60))
            .await
            .unwrap();

        // then:
        assert_eq!(cache.get("k").await.unwrap(), Some("v".to_string()));
    }

    #[tokio::test]
    async fn test_expired_entry_is_dropped_on_read() {
        // given: an entry written at t=1000 with a 60s TTL
        let clock = Arc::new(SteppingClock::new(1_000));
        let cache = InMemoryCache::new(clock.clone());
        cache
            .set("k", "v".to_string(), Duration::from_secs(60))
            .await
            .unwrap();

        // when: the TTL passes
        clock.advance(60_001);

        // then:
        assert_eq!(cache.get("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_entry_survives_until_the_deadline() {
        // given:
        let clock = Arc::new(SteppingClock::new(1_000));
        let cache = InMemoryCache::new(clock.clone());
        cache
            .set("k", "v".to_string(), Duration::from_secs(60))
            .await
            .unwrap();

        // when: just shy of the deadline
        clock.advance(59_999);

        // then:
        assert_eq!(cache.get("k").await.unwrap(), Some("v".to_string()));
    }

    #[tokio::test]
    async fn test_delete_removes_the_entry() {
        // given:
        let cache = InMemoryCache::new(Arc::new(FixedClock::new(1_000)));
        cache
            .set("k", "v".to_string(), Duration::from_secs(60))
            .await
            .unwrap();

        // when:
        cache.delete("k").await.unwrap();

        // then:
        assert_eq!(cache.get("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_overwrites_value_and_deadline() {
        // given:
        let cache = InMemoryCache::new(Arc::new(FixedClock::new(1_000)));
        cache
            .set("k", "old".to_string(), Duration::from_secs(60))
            .await
            .unwrap();

        // when:
        cache
            .set("k", "new".to_string(), Duration::from_secs(60))
            .await
            .unwrap();

        // then:
        assert_eq!(cache.get("k").await.unwrap(), Some("new".to_string()));
    }
}
