//! In-process cache implementation.

use super::service::{CacheResult, CacheService};
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Debug, Clone)]
struct CachedValue {
    value: String,
    expires_at: Instant,
}

impl CachedValue {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// A cache living in the server process.
///
/// Used when Redis is not configured or unreachable at startup. Entries are
/// not shared between instances, so a multi-instance deployment needs sticky
/// sessions or Redis. Expired entries are dropped lazily on access and by
/// [`MemoryCache::purge_expired`].
#[derive(Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, CachedValue>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        debug!("Using in-process MemoryCache");
        Self::default()
    }

    /// Removes every expired entry and returns how many were dropped.
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, v| !v.is_expired(now));
        before - entries.len()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl CacheService for MemoryCache {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let now = Instant::now();

        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(cached) if !cached.is_expired(now) => {
                    debug!("Cache HIT: {}", key);
                    return Ok(Some(cached.value.clone()));
                }
                Some(_) => {}
                None => {
                    debug!("Cache MISS: {}", key);
                    return Ok(None);
                }
            }
        }

        // expired
        let mut entries = self.entries.write().await;
        if entries.get(key).is_some_and(|v| v.is_expired(now)) {
            entries.remove(key);
        }
        debug!("Cache EXPIRED: {}", key);
        Ok(None)
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()> {
        let cached = CachedValue {
            value: value.to_string(),
            expires_at: Instant::now() + ttl,
        };
        self.entries.write().await.insert(key.to_string(), cached);
        debug!("Cache SET: {} (TTL: {}s)", key, ttl.as_secs());
        Ok(())
    }

    async fn delete(&self, key: &str) -> CacheResult<()> {
        if self.entries.write().await.remove(key).is_some() {
            debug!("Cache DELETE: {}", key);
        }
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
