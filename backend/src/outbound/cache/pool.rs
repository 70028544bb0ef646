//! Pooled Redis connections shared by the cache and queue adapters.

use std::time::Duration;

use bb8_redis::RedisConnectionManager;
use bb8_redis::bb8::{Pool, PooledConnection};

/// Errors that can occur while building or using the Redis pool.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CachePoolError {
    /// Failed to check a connection out of the pool.
    #[error("failed to get redis connection from pool: {message}")]
    Checkout { message: String },

    /// Failed to build the pool, typically a malformed URL.
    #[error("failed to build redis pool: {message}")]
    Build { message: String },
}

impl CachePoolError {
    /// Create a checkout error with the given message.
    pub fn checkout(message: impl Into<String>) -> Self {
        Self::Checkout {
            message: message.into(),
        }
    }

    /// Create a build error with the given message.
    pub fn build(message: impl Into<String>) -> Self {
        Self::Build {
            message: message.into(),
        }
    }
}

/// Configuration for the Redis connection pool.
#[derive(Debug, Clone)]
pub struct CachePoolConfig {
    redis_url: String,
    max_size: u32,
    connection_timeout: Duration,
}

impl CachePoolConfig {
    /// Configuration for `redis_url` with sixteen connections and a two second
    /// checkout timeout.
    pub fn new(redis_url: impl Into<String>) -> Self {
        Self {
            redis_url: redis_url.into(),
            max_size: 16,
            connection_timeout: Duration::from_secs(2),
        }
    }

    /// Set the maximum number of pooled connections.
    pub fn with_max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size;
        self
    }

    /// Set the checkout timeout.
    pub fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }

    /// Redis URL.
    pub fn redis_url(&self) -> &str {
        &self.redis_url
    }

    /// Maximum pool size.
    pub fn max_size(&self) -> u32 {
        self.max_size
    }
}

/// Process-wide Redis pool.
///
/// Checked-out connections go back to the pool when the guard drops.
#[derive(Clone)]
pub struct RedisPool {
    inner: Pool<RedisConnectionManager>,
}

impl RedisPool {
    /// Build the pool.
    ///
    /// Connections are opened lazily, so an unreachable server surfaces on
    /// first checkout rather than here.
    ///
    /// # Errors
    ///
    /// Returns [`CachePoolError::Build`] when the URL cannot be parsed.
    pub fn new(config: CachePoolConfig) -> Result<Self, CachePoolError> {
        let manager = RedisConnectionManager::new(config.redis_url.as_str())
            .map_err(|err| CachePoolError::build(err.to_string()))?;
        let inner = Pool::builder()
            .max_size(config.max_size)
            .connection_timeout(config.connection_timeout)
            .build_unchecked(manager);
        Ok(Self { inner })
    }

    /// Check a connection out of the pool.
    ///
    /// # Errors
    ///
    /// Returns [`CachePoolError::Checkout`] when no connection is available
    /// within the configured timeout.
    pub async fn get(
        &self,
    ) -> Result<PooledConnection<'_, RedisConnectionManager>, CachePoolError> {
        self.inner
            .get()
            .await
            .map_err(|err| CachePoolError::checkout(err.to_string()))
    }
}
