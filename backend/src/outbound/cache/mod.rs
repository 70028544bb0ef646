//! Redis cache adapter and the connection pool it shares with the queue.
//!
//! Built on `bb8-redis`. Entries carry a TTL with jitter so records loaded in
//! one burst do not all expire together.

mod pool;
mod redis_user_cache;

pub use pool::{CachePoolConfig, CachePoolError, RedisPool};
pub(crate) use redis_user_cache::is_connection_failure;
pub use redis_user_cache::{DEFAULT_CACHE_TTL, RedisUserCache};
