//! Port abstraction for the durable user store and its errors.
use async_trait::async_trait;

use crate::domain::{ListWindow, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user store connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user store query failed: {message}",
    }
}

/// Canonical owner of user records.
///
/// Updating or deleting an identifier with no row is not an error here; the
/// adapter reports success without confirming the row existed.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch one record. `Ok(None)` means no row matched.
    async fn get(&self, id: UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a page ordered by identifier. No match yields an empty vector.
    async fn list(&self, window: ListWindow) -> Result<Vec<User>, UserPersistenceError>;

    /// Allocate the identity for a record being created.
    ///
    /// Values come from the store's monotonic sequence and are never reused,
    /// even when the create that drew them later fails. The caller binds the
    /// returned id onto its record; the row itself is written by the consumer
    /// of the create queue.
    async fn create(&self) -> Result<UserId, UserPersistenceError>;

    /// Overwrite name and email for `user.id()`.
    async fn update(&self, user: &User) -> Result<(), UserPersistenceError>;

    /// Remove the row for `id`.
    async fn delete(&self, id: UserId) -> Result<(), UserPersistenceError>;

    /// Round-trip a trivial statement to prove the store is reachable.
    async fn ping(&self) -> Result<(), UserPersistenceError>;
}
