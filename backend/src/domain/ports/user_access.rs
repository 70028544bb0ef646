//! Driving port shared by every protocol front end.
//!
//! HTTP and gRPC adapters depend on this capability set and never on each
//! other, so read and write rules live in exactly one place.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Decoded but not yet validated client input for create and update.
///
/// Any identifier the client sent has already been discarded by the adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserInput {
    /// Requested display name.
    pub name: String,
    /// Requested email address.
    pub email: String,
}

impl UserInput {
    /// Bundle raw fields.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Protocol-agnostic user operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserAccess: Send + Sync {
    /// Cache-aside read of one record.
    async fn get_user(&self, id: UserId) -> Result<User, Error>;

    /// Paged read straight from the store; inputs are clamped, not rejected.
    async fn list_users(&self, start: i64, count: i64) -> Result<Vec<User>, Error>;

    /// Allocate identity, populate the cache, then notify the create queue.
    async fn create_user(&self, input: UserInput) -> Result<User, Error>;

    /// Write through the store under the path identifier.
    async fn update_user(&self, id: UserId, input: UserInput) -> Result<User, Error>;

    /// Remove the record.
    async fn delete_user(&self, id: UserId) -> Result<(), Error>;
}
