//! In-process cache implementation
//!
//! Behaves like the Redis client for the operations the catalog needs:
//! string values, absolute expiration, idempotent removal. Expiry is checked
//! against an injectable clock so tests can move time deterministically.

use crate::clock::{Clock, SystemClock};
use crate::errors::CacheError;
use crate::traits::{CacheEntryOptions, DistributedCache};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
struct MemoryEntry {
    value: String,
    expires_at: Option<DateTime<Utc>>,
}

impl MemoryEntry {
    /// Expired once `now` reaches the deadline
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        matches!(self.expires_at, Some(deadline) if now >= deadline)
    }
}

#[derive(Debug)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, MemoryEntry>>,
    clock: Arc<dyn Clock>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            clock,
        }
    }

    /// Number of live (unexpired) entries
    pub async fn len(&self) -> usize {
        let now = self.clock.now();
        self.entries
            .read()
            .await
            .values()
            .filter(|entry| !entry.is_expired(now))
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Deadline of a live entry; `None` if absent, expired or stored without expiration
    pub async fn expires_at(&self, key: &str) -> Option<DateTime<Utc>> {
        let now = self.clock.now();
        self.entries
            .read()
            .await
            .get(key)
            .filter(|entry| !entry.is_expired(now))
            .and_then(|entry| entry.expires_at)
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DistributedCache for MemoryCache {
    async fn get_string(&self, key: &str) -> Result<Option<String>, CacheError> {
        let now = self.clock.now();

        match self.entries.read().await.get(key) {
            Some(entry) if !entry.is_expired(now) => return Ok(Some(entry.value.clone())),
            Some(_) => {}
            None => return Ok(None),
        }

        // expired: purge so the key stops counting as live, unless rewritten meanwhile
        let mut entries = self.entries.write().await;
        if entries.get(key).is_some_and(|entry| entry.is_expired(now)) {
            entries.remove(key);
        }
        Ok(None)
    }

    async fn set_string(
        &self,
        key: &str,
        value: &str,
        options: &CacheEntryOptions,
    ) -> Result<(), CacheError> {
        let expires_at = match options.absolute_expiration_relative_to_now {
            Some(ttl) if ttl.is_zero() => return Err(CacheError::InvalidTtl(ttl)),
            Some(ttl) => {
                let delta = chrono::Duration::from_std(ttl).map_err(|_| CacheError::InvalidTtl(ttl))?;
                let deadline = self
                    .clock
                    .now()
                    .checked_add_signed(delta)
                    .ok_or(CacheError::InvalidTtl(ttl))?;
                Some(deadline)
            }
            None => None,
        };

        self.entries.write().await.insert(
            key.to_string(),
            MemoryEntry {
                value: value.to_string(),
                expires_at,
            },
        );
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), CacheError> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use std::time::Duration;

    fn cache_with_clock() -> (MemoryCache, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::default());
        (MemoryCache::with_clock(clock.clone()), clock)
    }

    #[tokio::test]
    async fn test_get_missing_key() {
        let (cache, _) = cache_with_clock();
        assert_eq!(cache.get_string("ProductsList").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let (cache, _) = cache_with_clock();
        let options = CacheEntryOptions::new().with_absolute_expiration(Duration::from_secs(180));

        cache.set_string("ProductsList", "[]", &options).await.unwrap();

        assert_eq!(
            cache.get_string("ProductsList").await.unwrap().as_deref(),
            Some("[]")
        );
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_entry_absent_at_deadline() {
        let (cache, clock) = cache_with_clock();
        let written_at = clock.now();
        let options = CacheEntryOptions::new().with_absolute_expiration(Duration::from_secs(180));
        cache.set_string("k", "v", &options).await.unwrap();

        assert_eq!(
            cache.expires_at("k").await,
            Some(written_at + chrono::Duration::seconds(180))
        );

        clock.advance(Duration::from_secs(179));
        assert!(cache.get_string("k").await.unwrap().is_some());

        clock.advance(Duration::from_secs(1));
        assert_eq!(cache.get_string("k").await.unwrap(), None);
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_reads_do_not_extend_expiration() {
        let (cache, clock) = cache_with_clock();
        let options = CacheEntryOptions::new().with_absolute_expiration(Duration::from_secs(60));
        cache.set_string("k", "v", &options).await.unwrap();
        let deadline = cache.expires_at("k").await;

        for _ in 0..5 {
            clock.advance(Duration::from_secs(10));
            assert!(cache.get_string("k").await.unwrap().is_some());
        }

        assert_eq!(cache.expires_at("k").await, deadline);
        clock.advance(Duration::from_secs(10));
        assert_eq!(cache.get_string("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_overwrite_resets_expiration() {
        let (cache, clock) = cache_with_clock();
        let options = CacheEntryOptions::new().with_absolute_expiration(Duration::from_secs(60));
        cache.set_string("k", "old", &options).await.unwrap();

        clock.advance(Duration::from_secs(50));
        cache.set_string("k", "new", &options).await.unwrap();

        clock.advance(Duration::from_secs(50));
        assert_eq!(cache.get_string("k").await.unwrap().as_deref(), Some("new"));
    }

    #[tokio::test]
    async fn test_no_expiration_never_expires() {
        let (cache, clock) = cache_with_clock();
        cache
            .set_string("k", "v", &CacheEntryOptions::new())
            .await
            .unwrap();

        clock.advance(Duration::from_secs(60 * 60 * 24 * 365));
        assert!(cache.get_string("k").await.unwrap().is_some());
        assert_eq!(cache.expires_at("k").await, None);
    }

    #[tokio::test]
    async fn test_zero_ttl_rejected() {
        let (cache, _) = cache_with_clock();
        let options = CacheEntryOptions::new().with_absolute_expiration(Duration::ZERO);

        let err = cache.set_string("k", "v", &options).await.unwrap_err();
        assert!(matches!(err, CacheError::InvalidTtl(_)));
    }

    #[tokio::test]
    async fn test_ttl_past_max_date_rejected() {
        let (cache, _) = cache_with_clock();
        let ttl = Duration::from_secs(10_000_000_000_000);
        let options = CacheEntryOptions::new().with_absolute_expiration(ttl);

        let err = cache.set_string("ProductsList", "[]", &options).await.unwrap_err();
        assert!(matches!(err, CacheError::InvalidTtl(rejected) if rejected == ttl));
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_expired_entry_is_purged_on_read() {
        let (cache, clock) = cache_with_clock();
        let options = CacheEntryOptions::new().with_absolute_expiration(Duration::from_secs(1));
        cache.set_string("k", "v", &options).await.unwrap();
        cache.set_string("other", "v", &CacheEntryOptions::new()).await.unwrap();

        clock.advance(Duration::from_secs(1));
        assert_eq!(cache.get_string("k").await.unwrap(), None);
        assert_eq!(cache.entries.read().await.len(), 1);
        assert!(cache.entries.read().await.contains_key("other"));
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        let (cache, _) = cache_with_clock();
        cache
            .set_string("k", "v", &CacheEntryOptions::new())
            .await
            .unwrap();

        cache.remove("k").await.unwrap();
        cache.remove("k").await.unwrap();
        assert_eq!(cache.get_string("k").await.unwrap(), None);
    }
}
