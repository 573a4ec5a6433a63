//! Per-identity cooldown gate for message sends.
//!
//! Fixed-window limiter: all attempts within the window since the last
//! accepted attempt are rejected, and the window re-opens sharply at its
//! boundary. Bursts exactly at the boundary are permitted by design; this
//! is a documented imprecision, not a bug. Scoped to anonymous identities —
//! registered identities are never throttled.

use std::sync::Arc;
use std::time::Duration;

use pixelchat_shared::time::Clock;

use crate::domain::{Identity, KeyValueCache, StoreError};

use super::error::GatewayError;

/// TTL of a rate-limit record in the cache; records self-clean.
pub const RATE_RECORD_TTL: Duration = Duration::from_secs(60);

fn rate_key(identity_id: &str) -> String {
    format!("last_message:{}", identity_id)
}

/// Fixed-window rate limiter over the shared cache.
pub struct RateLimiter {
    cache: Arc<dyn KeyValueCache>,
    clock: Arc<dyn Clock>,
    window: Duration,
}

impl RateLimiter {
    pub fn new(cache: Arc<dyn KeyValueCache>, clock: Arc<dyn Clock>, window: Duration) -> Self {
        Self {
            cache,
            clock,
            window,
        }
    }

    /// Gate a send attempt.
    ///
    /// Registered identities always pass. For anonymous identities, an
    /// attempt inside the window is rejected with a retry hint and no side
    /// effects; an attempt outside it records the current timestamp (60s
    /// TTL) and passes.
    pub async fn check(&self, identity: &Identity) -> Result<(), GatewayError> {
        if !identity.anonymous {
            return Ok(());
        }

        let key = rate_key(&identity.id);
        let now = self.clock.now_millis();
        let window_ms = self.window.as_millis() as i64;

        if let Some(raw) = self.cache.get(&key).await? {
            if let Ok(last) = raw.parse::<i64>() {
                let elapsed = now - last;
                if elapsed < window_ms {
                    return Err(GatewayError::RateLimited {
                        retry_after_ms: window_ms - elapsed,
                    });
                }
            }
        }

        self.cache.set(&key, now.to_string(), RATE_RECORD_TTL).await?;
        Ok(())
    }

    /// Drop the rate-limit record for an anonymous identity.
    ///
    /// Best-effort on disconnect; the record expires on its own anyway.
    pub async fn clear(&self, identity: &Identity) -> Result<(), StoreError> {
        if !identity.anonymous {
            return Ok(());
        }
        self.cache.delete(&rate_key(&identity.id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::cache::InMemoryCache;
    use std::sync::atomic::{AtomicI64, Ordering};

    /// Clock whose time can be advanced from the test body.
    struct SteppingClock {
        now: AtomicI64,
    }

    impl SteppingClock {
        fn new(start: i64) -> Arc<Self> {
            Arc::new(Self {
                now: AtomicI64::new(start),
            })
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

    fn limiter_with_clock(clock: Arc<SteppingClock>) -> RateLimiter {
        let cache = Arc::new(InMemoryCache::new(clock.clone()));
        RateLimiter::new(cache, clock, Duration::from_secs(5))
    }

    #[tokio::test]
    async fn test_first_send_is_allowed() {
        // given:
        let clock = SteppingClock::new(1_000_000);
        let limiter = limiter_with_clock(clock);
        let identity = Identity::anonymous("conn-1", "HappyGamer1");

        // when / then:
        assert_eq!(limiter.check(&identity).await, Ok(()));
    }

    #[tokio::test]
    async fn test_second_send_inside_window_is_rejected_with_retry_hint() {
        // given:
        let clock = SteppingClock::new(1_000_000);
        let limiter = limiter_with_clock(clock.clone());
        let identity = Identity::anonymous("conn-1", "HappyGamer1");
        limiter.check(&identity).await.unwrap();

        // when: 2 seconds into a 5 second window
        clock.advance(2_000);
        let result = limiter.check(&identity).await;

        // then:
        assert_eq!(
            result,
            Err(GatewayError::RateLimited {
                retry_after_ms: 3_000
            })
        );
    }

    #[tokio::test]
    async fn test_send_after_window_elapses_is_allowed() {
        // given:
        let clock = SteppingClock::new(1_000_000);
        let limiter = limiter_with_clock(clock.clone());
        let identity = Identity::anonymous("conn-1", "HappyGamer1");
        limiter.check(&identity).await.unwrap();

        // when: the full window has elapsed
        clock.advance(5_000);

        // then:
        assert_eq!(limiter.check(&identity).await, Ok(()));
    }

    #[tokio::test]
    async fn test_rejection_has_no_side_effects() {
        // given:
        let clock = SteppingClock::new(1_000_000);
        let limiter = limiter_with_clock(clock.clone());
        let identity = Identity::anonymous("conn-1", "HappyGamer1");
        limiter.check(&identity).await.unwrap();

        // when: a rejected attempt right before the boundary
        clock.advance(4_999);
        limiter.check(&identity).await.unwrap_err();

        // then: the window still re-opens at the original boundary
        clock.advance(1);
        assert_eq!(limiter.check(&identity).await, Ok(()));
    }

    #[tokio::test]
    async fn test_registered_identity_is_never_limited() {
        // given:
        let clock = SteppingClock::new(1_000_000);
        let limiter = limiter_with_clock(clock);
        let identity = Identity::registered("steam-123", "GordonF");

        // when / then: back-to-back sends all pass
        for _ in 0..10 {
            assert_eq!(limiter.check(&identity).await, Ok(()));
        }
    }

    #[tokio::test]
    async fn test_record_expires_on_its_own() {
        // given:
        let clock = SteppingClock::new(1_000_000);
        let limiter = limiter_with_clock(clock.clone());
        let identity = Identity::anonymous("conn-1", "HappyGamer1");
        limiter.check(&identity).await.unwrap();

        // when: the cache TTL (60s) passes
        clock.advance(60_000);

        // then:
        assert_eq!(limiter.check(&identity).await, Ok(()));
    }

    #[tokio::test]
    async fn test_clear_removes_the_record() {
        // given:
        let clock = SteppingClock::new(1_000_000);
        let limiter = limiter_with_clock(clock.clone());
        let identity = Identity::anonymous("conn-1", "HappyGamer1");
        limiter.check(&identity).await.unwrap();

        // when:
        limiter.clear(&identity).await.unwrap();

        // then: the next send is allowed immediately
        assert_eq!(limiter.check(&identity).await, Ok(()));
    }

    #[tokio::test]
    async fn test_limiters_are_scoped_per_identity() {
        // given:
        let clock = SteppingClock::new(1_000_000);
        let limiter = limiter_with_clock(clock);
        let alice = Identity::anonymous("conn-a", "HappyGamer1");
        let bob = Identity::anonymous("conn-b", "BraveKnight2");

        // when:
        limiter.check(&alice).await.unwrap();

        // then: bob is unaffected by alice's record
        assert_eq!(limiter.check(&bob).await, Ok(()));
    }
}
