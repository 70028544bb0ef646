//! Access coordinator implementing the [`UserAccess`] driving port.
//!
//! Reads are cache-aside: the cache is always consulted first and the store
//! is only touched on a miss, after which the cache is refilled. Creates
//! allocate identity from the store sequence, populate the cache, then notify
//! the create queue, strictly in that order. Updates and deletes write the
//! store and then invalidate the cache entry before reporting success.
//!
//! Each operation is a single linear pipeline that stops at the first
//! failure. Nothing is rolled back; a burned sequence value or a cache entry
//! without its queue notification is accepted.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::ports::{
    ErrorReporter, NoOpErrorReporter, QueueName, ReportContext, UserAccess, UserCache,
    UserCacheError, UserInput, UserPersistenceError, UserQueue, UserQueueError, UserRepository,
};
use crate::domain::{Error, ListWindow, User, UserDraft, UserId};

/// Message returned when no record matches an identifier.
pub const USER_NOT_FOUND_MESSAGE: &str = "User not found";

/// Coordinates the cache, store and queue behind one capability set.
#[derive(Clone)]
pub struct UserAccessService<R, C, Q> {
    repository: Arc<R>,
    cache: Arc<C>,
    queue: Arc<Q>,
    create_queue: QueueName,
    reporter: Arc<dyn ErrorReporter>,
}

impl<R, C, Q> UserAccessService<R, C, Q> {
    /// Build a coordinator over long-lived handles.
    ///
    /// Creates notify [`QueueName::create_user`] and errors are not reported
    /// anywhere until [`Self::with_error_reporter`] is used.
    pub fn new(repository: Arc<R>, cache: Arc<C>, queue: Arc<Q>) -> Self {
        Self {
            repository,
            cache,
            queue,
            create_queue: QueueName::create_user(),
            reporter: Arc::new(NoOpErrorReporter),
        }
    }

    /// Notify `queue` instead of the default create queue.
    pub fn with_create_queue(mut self, queue: QueueName) -> Self {
        self.create_queue = queue;
        self
    }

    /// Send surfaced backend failures to `reporter`.
    pub fn with_error_reporter(mut self, reporter: Arc<dyn ErrorReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    fn reported(&self, error: Error, context: ReportContext) -> Error {
        if error.code().is_backend() {
            self.reporter.report(&error, &context);
        }
        error
    }
}

fn map_store_error(error: UserPersistenceError) -> Error {
    debug!(%error, "user store call failed");
    match error {
        UserPersistenceError::Connection { .. } => Error::store_failure("user store unavailable"),
        UserPersistenceError::Query { .. } => Error::store_failure("user store query failed"),
    }
}

fn map_cache_error(error: UserCacheError) -> Error {
    debug!(%error, "user cache call failed");
    match error {
        UserCacheError::Connection { .. } => Error::cache_failure("user cache unavailable"),
        UserCacheError::Command { .. } => Error::cache_failure("user cache command failed"),
    }
}

fn map_queue_error(error: UserQueueError) -> Error {
    debug!(%error, "user queue call failed");
    match error {
        UserQueueError::Unavailable { .. } => Error::cache_failure("user queue unavailable"),
        UserQueueError::Rejected { .. } => Error::cache_failure("user queue rejected the job"),
    }
}

fn validate(input: UserInput) -> Result<UserDraft, Error> {
    UserDraft::new(input.name, input.email).map_err(|err| Error::invalid_request(err.to_string()))
}

impl<R, C, Q> UserAccessService<R, C, Q>
where
    R: UserRepository,
    C: UserCache,
    Q: UserQueue,
{
    /// Look the record up in the cache.
    ///
    /// Connection failures, empty values and undecodable payloads all count
    /// as a miss so the read can fall through to the store.
    async fn cached_user(&self, id: UserId) -> Option<User> {
        let payload = match self.cache.get(id).await {
            Ok(Some(payload)) => payload,
            Ok(None) => return None,
            Err(error) => {
                warn!(user_id = %id, %error, "cache read failed; falling back to store");
                return None;
            }
        };

        match serde_json::from_str::<User>(&payload) {
            Ok(user) if user.id() == id => Some(user),
            Ok(user) => {
                warn!(user_id = %id, cached_id = %user.id(), "cached record has mismatched id");
                None
            }
            Err(error) => {
                warn!(user_id = %id, %error, "cached record is not valid JSON");
                None
            }
        }
    }

    async fn cache_user(&self, user: &User) -> Result<(), Error> {
        let payload = serde_json::to_string(user)
            .map_err(|err| Error::internal(format!("failed to serialise user: {err}")))?;
        self.cache
            .set(user.id(), &payload)
            .await
            .map_err(map_cache_error)
    }

    async fn invalidate(&self, id: UserId) -> Result<(), Error> {
        self.cache.delete(id).await.map_err(map_cache_error)
    }

    async fn load_user(&self, id: UserId) -> Result<User, Error> {
        if let Some(user) = self.cached_user(id).await {
            return Ok(user);
        }

        let user = self
            .repository
            .get(id)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| Error::not_found(USER_NOT_FOUND_MESSAGE))?;
        self.cache_user(&user).await?;
        Ok(user)
    }

    async fn insert_user(&self, input: UserInput) -> Result<User, Error> {
        let draft = validate(input)?;
        let id = self.repository.create().await.map_err(map_store_error)?;
        if !id.is_assigned() {
            return Err(Error::internal(format!(
                "store allocated an unusable user id {id}"
            )));
        }

        let user = draft.into_user(id);
        self.cache_user(&user).await?;
        self.queue
            .enqueue(&self.create_queue, id)
            .await
            .map_err(map_queue_error)?;
        Ok(user)
    }

    async fn replace_user(&self, id: UserId, input: UserInput) -> Result<User, Error> {
        let user = validate(input)?.into_user(id);
        self.repository
            .update(&user)
            .await
            .map_err(map_store_error)?;
        self.invalidate(id).await?;
        Ok(user)
    }

    async fn remove_user(&self, id: UserId) -> Result<(), Error> {
        self.repository.delete(id).await.map_err(map_store_error)?;
        self.invalidate(id).await
    }
}

#[async_trait]
impl<R, C, Q> UserAccess for UserAccessService<R, C, Q>
where
    R: UserRepository,
    C: UserCache,
    Q: UserQueue,
{
    async fn get_user(&self, id: UserId) -> Result<User, Error> {
        self.load_user(id)
            .await
            .map_err(|err| self.reported(err, ReportContext::new("get_user").with_user(id)))
    }

    async fn list_users(&self, start: i64, count: i64) -> Result<Vec<User>, Error> {
        let window = ListWindow::clamped(start, count);
        self.repository
            .list(window)
            .await
            .map_err(map_store_error)
            .map_err(|err| self.reported(err, ReportContext::new("list_users")))
    }

    async fn create_user(&self, input: UserInput) -> Result<User, Error> {
        self.insert_user(input)
            .await
            .map_err(|err| self.reported(err, ReportContext::new("create_user")))
    }

    async fn update_user(&self, id: UserId, input: UserInput) -> Result<User, Error> {
        self.replace_user(id, input)
            .await
            .map_err(|err| self.reported(err, ReportContext::new("update_user").with_user(id)))
    }

    async fn delete_user(&self, id: UserId) -> Result<(), Error> {
        self.remove_user(id)
            .await
            .map_err(|err| self.reported(err, ReportContext::new("delete_user").with_user(id)))
    }
}

#[cfg(test)]
#[path = "user_access_service_tests.rs"]
mod tests;
