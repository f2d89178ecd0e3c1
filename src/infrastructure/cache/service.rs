//! Cache service trait and error types.

use async_trait::async_trait;
use std::time::Duration;

/// Errors raised by a cache backend.
///
/// Only connecting can fail; once running, backends log their errors and
/// behave like an empty cache.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("cache connection error: {0}")]
    Connection(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Short-lived key/value store with per-entry expiry.
///
/// Holds the per-user availability check between the check and the purchase
/// form. Values are opaque strings (JSON in practice).
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed, shared between instances
/// - [`crate::infrastructure::cache::MemoryCache`] - In-process, used when Redis is not configured
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Live value under `key`. Misses, expired entries and backend errors all
    /// read as `Ok(None)`.
    async fn get(&self, key: &str) -> CacheResult<Option<String>>;

    /// Stores `value` under `key` for `ttl`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Should not propagate backend errors; implementations log them and
    /// return `Ok(())`.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()>;

    /// Removes a value; backend errors are logged, not returned.
    async fn delete(&self, key: &str) -> CacheResult<()>;

    /// Round-trips to the backend.
    async fn health_check(&self) -> bool;

    /// Backend name for health output.
    fn backend(&self) -> &'static str;
}
