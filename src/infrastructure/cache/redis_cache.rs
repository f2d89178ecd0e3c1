//! Redis-backed cache implementation.

use super::service::{CacheError, CacheResult, CacheService};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Namespace of every key this service writes.
const KEY_PREFIX: &str = "domain-purchase:";

/// Cache shared by every instance through Redis.
///
/// The `ConnectionManager` reconnects on its own. Once connected the cache
/// fails open: a Redis error is logged and reads as a miss.
pub struct RedisCache {
    conn: ConnectionManager,
}

impl RedisCache {
    /// Opens a managed connection and PINGs it.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Connection`] if the URL is invalid or Redis does
    /// not answer.
    pub async fn connect(redis_url: &str) -> CacheResult<Self> {
        info!("Connecting to Redis");

        let client = Client::open(redis_url)
            .map_err(|e| CacheError::Connection(format!("invalid Redis URL: {e}")))?;
        let mut conn = ConnectionManager::new(client)
            .await
            .map_err(|e| CacheError::Connection(e.to_string()))?;

        conn.ping::<()>()
            .await
            .map_err(|e| CacheError::Connection(format!("PING failed: {e}")))?;

        info!("✓ Connected to Redis");
        Ok(Self { conn })
    }

    fn namespaced(key: &str) -> String {
        format!("{KEY_PREFIX}{key}")
    }
}

#[async_trait]
impl CacheService for RedisCache {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let mut conn = self.conn.clone();

        let value = conn
            .get::<_, Option<String>>(Self::namespaced(key))
            .await
            .unwrap_or_else(|e| {
                warn!(key, "Redis GET failed, treating as miss: {}", e);
                None
            });

        debug!(key, hit = value.is_some(), "Cache GET");
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()> {
        let mut conn = self.conn.clone();
        // SETEX rejects a zero expiry.
        let seconds = ttl.as_secs().max(1);

        match conn
            .set_ex::<_, _, ()>(Self::namespaced(key), value, seconds)
            .await
        {
            Ok(()) => debug!(key, ttl = seconds, "Cache SET"),
            Err(e) => warn!(key, "Redis SET failed: {}", e),
        }

        Ok(())
    }

    async fn delete(&self, key: &str) -> CacheResult<()> {
        let mut conn = self.conn.clone();

        if let Err(e) = conn.del::<_, ()>(Self::namespaced(key)).await {
            warn!(key, "Redis DEL failed: {}", e);
        }

        Ok(())
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.conn.clone();
        conn.ping::<()>().await.is_ok()
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}
