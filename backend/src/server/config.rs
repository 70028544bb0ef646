//! Server configuration objects and the dependency graph behind them.

use std::net::SocketAddr;
use std::sync::Arc;

use color_eyre::eyre::{Result, WrapErr};

use users_service::domain::ports::{HealthCheck, UserAccess};
use users_service::domain::{DependencyHealthService, UserAccessService};
use users_service::inbound::http::state::HttpState;
use users_service::outbound::cache::{CachePoolConfig, RedisPool, RedisUserCache};
use users_service::outbound::error_reporting::TracingErrorReporter;
use users_service::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
use users_service::outbound::queue::RedisUserQueue;
use users_service::settings::ServiceSettings;

/// Builder-style configuration for creating the HTTP and gRPC servers.
pub struct ServerConfig {
    pub(crate) http_bind: SocketAddr,
    pub(crate) grpc_bind: SocketAddr,
    pub(crate) http_state: HttpState,
}

impl ServerConfig {
    /// Resolve settings into live pools and adapters.
    ///
    /// # Errors
    /// Fails when a setting is invalid or a pool cannot be built.
    pub async fn from_settings(settings: &ServiceSettings) -> Result<Self> {
        let http_bind = settings.http_bind()?;
        let grpc_bind = settings.grpc_bind()?;

        let db_config = PoolConfig::new(settings.database_url()?)
            .with_max_size(settings.db_pool_size());
        let db_pool = DbPool::new(db_config)
            .await
            .wrap_err("failed to build database pool")?;

        let cache_config = CachePoolConfig::new(settings.redis_url())
            .with_max_size(settings.cache_pool_size());
        let redis_pool = RedisPool::new(cache_config).wrap_err("failed to build redis pool")?;

        let repository = Arc::new(DieselUserRepository::new(db_pool));
        let cache = Arc::new(RedisUserCache::new(redis_pool.clone()).with_ttl(settings.cache_ttl()));
        let queue = Arc::new(RedisUserQueue::new(redis_pool));

        let users: Arc<dyn UserAccess> = Arc::new(
            UserAccessService::new(Arc::clone(&repository), Arc::clone(&cache), queue)
                .with_create_queue(settings.create_queue()?)
                .with_error_reporter(Arc::new(TracingErrorReporter::new())),
        );
        let health: Arc<dyn HealthCheck> =
            Arc::new(DependencyHealthService::new(repository, cache));

        Ok(Self {
            http_bind,
            grpc_bind,
            http_state: HttpState::new(users, health),
        })
    }

    /// Return the socket address the HTTP server will bind to.
    #[must_use]
    pub fn http_bind(&self) -> SocketAddr {
        self.http_bind
    }

    /// Return the socket address the gRPC server will bind to.
    #[must_use]
    pub fn grpc_bind(&self) -> SocketAddr {
        self.grpc_bind
    }
}
