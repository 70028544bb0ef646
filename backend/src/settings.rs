//! Service configuration loaded via OrthoConfig.
//!
//! Values layer CLI flags over `USERS_*` environment variables over an
//! optional config file. Everything except the database URL has a default.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::ports::{CREATE_USER_QUEUE, QueueName, QueueNameValidationError};

const DEFAULT_HTTP_BIND: &str = "0.0.0.0:8080";
const DEFAULT_GRPC_BIND: &str = "0.0.0.0:50051";
const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379";
const DEFAULT_DB_POOL_SIZE: u32 = 10;
const DEFAULT_CACHE_POOL_SIZE: u32 = 16;
const DEFAULT_CACHE_TTL_SECS: u64 = 3600;

/// Errors raised while interpreting loaded settings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    /// No database URL was supplied through any layer.
    #[error("database_url must be set (USERS_DATABASE_URL or --database-url)")]
    MissingDatabaseUrl,
    /// A bind address did not parse.
    #[error("{field} is not a socket address: {value}")]
    InvalidBind {
        /// Setting name.
        field: &'static str,
        /// Offending value.
        value: String,
    },
    /// The create queue name was rejected.
    #[error("create_queue is invalid: {0}")]
    InvalidQueue(#[from] QueueNameValidationError),
}

/// Runtime settings for the users service.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "USERS")]
pub struct ServiceSettings {
    /// HTTP listen address.
    pub http_bind: Option<String>,
    /// gRPC listen address.
    pub grpc_bind: Option<String>,
    /// PostgreSQL connection URL.
    pub database_url: Option<String>,
    /// Redis connection URL shared by cache and queue.
    pub redis_url: Option<String>,
    /// Maximum PostgreSQL connections.
    pub db_pool_size: Option<u32>,
    /// Maximum Redis connections.
    pub cache_pool_size: Option<u32>,
    /// Base lifetime of cached records, in seconds.
    pub cache_ttl_secs: Option<u64>,
    /// Queue notified after each create.
    pub create_queue: Option<String>,
}

fn parse_bind(field: &'static str, raw: Option<&str>, default: &str) -> Result<SocketAddr, SettingsError> {
    let value = raw.unwrap_or(default);
    value.parse().map_err(|_| SettingsError::InvalidBind {
        field,
        value: value.to_owned(),
    })
}

impl ServiceSettings {
    /// HTTP listen address, `0.0.0.0:8080` by default.
    pub fn http_bind(&self) -> Result<SocketAddr, SettingsError> {
        parse_bind("http_bind", self.http_bind.as_deref(), DEFAULT_HTTP_BIND)
    }

    /// gRPC listen address, `0.0.0.0:50051` by default.
    pub fn grpc_bind(&self) -> Result<SocketAddr, SettingsError> {
        parse_bind("grpc_bind", self.grpc_bind.as_deref(), DEFAULT_GRPC_BIND)
    }

    /// PostgreSQL URL. Required.
    pub fn database_url(&self) -> Result<&str, SettingsError> {
        self.database_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or(SettingsError::MissingDatabaseUrl)
    }

    /// Redis URL, local default port when unset.
    pub fn redis_url(&self) -> &str {
        self.redis_url.as_deref().unwrap_or(DEFAULT_REDIS_URL)
    }

    /// PostgreSQL pool size.
    pub fn db_pool_size(&self) -> u32 {
        self.db_pool_size.unwrap_or(DEFAULT_DB_POOL_SIZE)
    }

    /// Redis pool size.
    pub fn cache_pool_size(&self) -> u32 {
        self.cache_pool_size.unwrap_or(DEFAULT_CACHE_POOL_SIZE)
    }

    /// Base cache entry lifetime.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs.unwrap_or(DEFAULT_CACHE_TTL_SECS))
    }

    /// Validated create queue name, `CREATE_USER` when unset.
    pub fn create_queue(&self) -> Result<QueueName, SettingsError> {
        Ok(QueueName::new(
            self.create_queue.as_deref().unwrap_or(CREATE_USER_QUEUE),
        )?)
    }
}
