//! Redis-backed [`UserCache`].
//!
//! Keys are the decimal user id so other consumers of the same Redis can read
//! a record by the id they were handed. Values are the record's JSON.

use std::time::Duration;

use async_trait::async_trait;
use bb8_redis::redis::{self, AsyncCommands, RedisError};
use rand::Rng;

use crate::domain::UserId;
use crate::domain::ports::{UserCache, UserCacheError};

use super::pool::{CachePoolError, RedisPool};

/// Default lifetime of a cached record.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(3600);

/// Cache adapter storing serialised users under their id.
#[derive(Clone)]
pub struct RedisUserCache {
    pool: RedisPool,
    ttl: Duration,
}

impl RedisUserCache {
    /// Cache over `pool` with [`DEFAULT_CACHE_TTL`].
    pub fn new(pool: RedisPool) -> Self {
        Self {
            pool,
            ttl: DEFAULT_CACHE_TTL,
        }
    }

    /// Override the base entry lifetime.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

fn cache_key(id: UserId) -> String {
    id.get().to_string()
}

/// Base TTL in whole seconds plus up to 10% random extra, never below one.
///
/// Entries written in the same burst therefore expire spread out.
fn jittered_ttl_secs<R: Rng + ?Sized>(ttl: Duration, rng: &mut R) -> u64 {
    let base = ttl.as_secs().max(1);
    let spread = base / 10;
    if spread == 0 {
        return base;
    }
    base + rng.gen_range(0..=spread)
}

fn map_pool_error(error: CachePoolError) -> UserCacheError {
    UserCacheError::connection(error.to_string())
}

pub(crate) fn is_connection_failure(error: &RedisError) -> bool {
    error.is_io_error()
        || error.is_connection_dropped()
        || error.is_connection_refusal()
        || error.is_timeout()
}

fn map_redis_error(error: RedisError) -> UserCacheError {
    if is_connection_failure(&error) {
        UserCacheError::connection(error.to_string())
    } else {
        UserCacheError::command(error.to_string())
    }
}

#[async_trait]
impl UserCache for RedisUserCache {
    async fn get(&self, id: UserId) -> Result<Option<String>, UserCacheError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let value: Option<String> = conn.get(cache_key(id)).await.map_err(map_redis_error)?;
        Ok(value.filter(|payload| !payload.is_empty()))
    }

    async fn set(&self, id: UserId, record: &str) -> Result<(), UserCacheError> {
        let ttl = jittered_ttl_secs(self.ttl, &mut rand::thread_rng());
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let () = conn
            .set_ex(cache_key(id), record, ttl)
            .await
            .map_err(map_redis_error)?;
        Ok(())
    }

    async fn delete(&self, id: UserId) -> Result<(), UserCacheError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let _removed: i64 = conn.del(cache_key(id)).await.map_err(map_redis_error)?;
        Ok(())
    }

    async fn ping(&self) -> Result<(), UserCacheError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        redis::cmd("PING")
            .query_async::<String>(&mut *conn)
            .await
            .map_err(map_redis_error)?;
        Ok(())
    }
}
