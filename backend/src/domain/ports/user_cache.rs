//! Port interface for the user record cache.
use async_trait::async_trait;

use crate::domain::UserId;

use super::define_port_error;

define_port_error! {
    /// Errors surfaced by the caching adapter.
    pub enum UserCacheError {
        /// No pooled connection could be acquired.
        Connection { message: String } => "user cache connection failed: {message}",
        /// The cache rejected or failed a command.
        Command { message: String } => "user cache command failed: {message}",
    }
}

/// Key-value view over serialised user records, keyed by identifier.
///
/// Holds no business rules. Entries are derived copies that may be stale or
/// expire at any time; the repository remains the source of truth.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserCache: Send + Sync {
    /// Read the serialised record for `id`.
    ///
    /// Adapters return `Ok(None)` for absent keys and for empty values.
    async fn get(&self, id: UserId) -> Result<Option<String>, UserCacheError>;

    /// Store the serialised record for `id`.
    async fn set(&self, id: UserId, record: &str) -> Result<(), UserCacheError>;

    /// Drop any entry for `id`. Absent keys are not an error.
    async fn delete(&self, id: UserId) -> Result<(), UserCacheError>;

    /// Prove the cache is reachable.
    async fn ping(&self) -> Result<(), UserCacheError>;
}
