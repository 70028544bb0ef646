//! Dependency health probe implementing [`HealthCheck`].

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::domain::ports::{HealthCheck, HealthStatus, UserCache, UserRepository};

/// Pings the cache and the store concurrently.
///
/// Both dependencies are always probed so one slow failure does not hide the
/// other in logs, but the result is a single undifferentiated status.
pub struct DependencyHealthService<R, C> {
    repository: Arc<R>,
    cache: Arc<C>,
}

impl<R, C> DependencyHealthService<R, C> {
    /// Probe `repository` and `cache`.
    pub fn new(repository: Arc<R>, cache: Arc<C>) -> Self {
        Self { repository, cache }
    }
}

#[async_trait]
impl<R, C> HealthCheck for DependencyHealthService<R, C>
where
    R: UserRepository,
    C: UserCache,
{
    async fn check(&self) -> HealthStatus {
        let (cache, store) = futures_util::join!(self.cache.ping(), self.repository.ping());
        let mut status = HealthStatus::Ok;
        if let Err(error) = cache {
            warn!(%error, "cache ping failed");
            status = HealthStatus::Critical;
        }
        if let Err(error) = store {
            warn!(%error, "store ping failed");
            status = HealthStatus::Critical;
        }
        status
    }
}
