//! Redis list producer implementing the [`UserQueue`] port.
//!
//! Each job is the decimal user id pushed with `RPUSH` onto a list named after
//! the queue. An `Ok` means Redis acknowledged the push. A list hands each
//! element to at most one popping consumer and keeps nothing once popped, so
//! delivery is at most once; consumers wanting stronger guarantees need their
//! own acknowledgement scheme.

use async_trait::async_trait;
use bb8_redis::redis::{AsyncCommands, RedisError};

use crate::domain::UserId;
use crate::domain::ports::{QueueName, UserQueue, UserQueueError};

use super::cache::{RedisPool, is_connection_failure};

/// Queue producer over a shared [`RedisPool`].
#[derive(Clone)]
pub struct RedisUserQueue {
    pool: RedisPool,
}

impl RedisUserQueue {
    /// Producer over `pool`.
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }
}

fn map_redis_error(error: RedisError) -> UserQueueError {
    if is_connection_failure(&error) {
        UserQueueError::unavailable(error.to_string())
    } else {
        UserQueueError::rejected(error.to_string())
    }
}

#[async_trait]
impl UserQueue for RedisUserQueue {
    async fn enqueue(&self, queue: &QueueName, id: UserId) -> Result<(), UserQueueError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| UserQueueError::unavailable(err.to_string()))?;
        let depth: i64 = conn
            .rpush(queue.as_str(), id.get())
            .await
            .map_err(map_redis_error)?;
        tracing::debug!(queue = %queue, user_id = %id, depth, "user job enqueued");
        Ok(())
    }
}
