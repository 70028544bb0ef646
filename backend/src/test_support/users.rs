//! In-memory doubles for the user ports.
//!
//! Every double can share a [`CallLog`] so tests can assert the relative
//! order of calls across the store, cache and queue.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{
    QueueName, UserCache, UserCacheError, UserPersistenceError, UserQueue, UserQueueError,
    UserRepository,
};
use crate::domain::{ListWindow, User, UserId};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(_) => panic!("test double mutex poisoned"),
    }
}

/// Ordered record of calls made against the doubles.
#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    /// Empty log.
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, entry: String) {
        lock(&self.0).push(entry);
    }

    /// Snapshot of every entry so far.
    pub fn entries(&self) -> Vec<String> {
        lock(&self.0).clone()
    }

    /// Position of the first entry equal to `entry`.
    pub fn position(&self, entry: &str) -> Option<usize> {
        lock(&self.0).iter().position(|e| e == entry)
    }
}

/// Store double backed by a `BTreeMap` and a local sequence.
///
/// `reads` counts `get` and `list` calls so tests can prove the store was
/// bypassed.
#[derive(Debug)]
pub struct InMemoryUserRepository {
    rows: Mutex<BTreeMap<i64, User>>,
    sequence: AtomicI64,
    reads: AtomicUsize,
    writes: AtomicUsize,
    failure: Mutex<Option<UserPersistenceError>>,
    log: CallLog,
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self {
            rows: Mutex::new(BTreeMap::new()),
            sequence: AtomicI64::new(0),
            reads: AtomicUsize::new(0),
            writes: AtomicUsize::new(0),
            failure: Mutex::new(None),
            log: CallLog::default(),
        }
    }
}

impl InMemoryUserRepository {
    /// Empty store whose sequence starts at 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record calls into `log`.
    pub fn with_log(mut self, log: CallLog) -> Self {
        self.log = log;
        self
    }

    /// Seed a row directly, bypassing the counters.
    pub fn insert(&self, user: User) {
        lock(&self.rows).insert(user.id().get(), user);
    }

    /// Row currently stored for `id`.
    pub fn row(&self, id: UserId) -> Option<User> {
        lock(&self.rows).get(&id.get()).cloned()
    }

    /// Number of `get`/`list` calls served.
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Number of `create`/`update`/`delete` calls served.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Fail every subsequent call with `error`; `None` restores service.
    pub fn fail_with(&self, error: Option<UserPersistenceError>) {
        *lock(&self.failure) = error;
    }

    fn check(&self) -> Result<(), UserPersistenceError> {
        lock(&self.failure).clone().map_or(Ok(()), Err)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.log.push(format!("store.get:{id}"));
        self.check()?;
        Ok(self.row(id))
    }

    async fn list(&self, window: ListWindow) -> Result<Vec<User>, UserPersistenceError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.log.push("store.list".to_owned());
        self.check()?;
        let offset = usize::try_from(window.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(window.limit()).unwrap_or(0);
        Ok(lock(&self.rows)
            .values()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn create(&self) -> Result<UserId, UserPersistenceError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        let id = UserId::new(self.sequence.fetch_add(1, Ordering::SeqCst) + 1);
        self.log.push(format!("store.create:{id}"));
        Ok(id)
    }

    async fn update(&self, user: &User) -> Result<(), UserPersistenceError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.log.push(format!("store.update:{}", user.id()));
        self.check()?;
        let mut rows = lock(&self.rows);
        if let Some(row) = rows.get_mut(&user.id().get()) {
            *row = user.clone();
        }
        Ok(())
    }

    async fn delete(&self, id: UserId) -> Result<(), UserPersistenceError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.log.push(format!("store.delete:{id}"));
        self.check()?;
        lock(&self.rows).remove(&id.get());
        Ok(())
    }

    async fn ping(&self) -> Result<(), UserPersistenceError> {
        self.check()
    }
}

/// Operation a [`InMemoryUserCache`] can be told to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheOp {
    /// `get`
    Get,
    /// `set`
    Set,
    /// `delete`
    Delete,
    /// `ping`
    Ping,
}

/// Cache double holding raw payloads in a `HashMap`.
#[derive(Debug, Default)]
pub struct InMemoryUserCache {
    entries: Mutex<HashMap<i64, String>>,
    failures: Mutex<HashMap<CacheOp, UserCacheError>>,
    log: CallLog,
}

impl InMemoryUserCache {
    /// Empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record calls into `log`.
    pub fn with_log(mut self, log: CallLog) -> Self {
        self.log = log;
        self
    }

    /// Seed a raw payload.
    pub fn put(&self, id: UserId, payload: impl Into<String>) {
        lock(&self.entries).insert(id.get(), payload.into());
    }

    /// Raw payload stored for `id`.
    pub fn entry(&self, id: UserId) -> Option<String> {
        lock(&self.entries).get(&id.get()).cloned()
    }

    /// Make `op` fail with `error` until cleared.
    pub fn fail(&self, op: CacheOp, error: UserCacheError) {
        lock(&self.failures).insert(op, error);
    }

    /// Stop failing `op`.
    pub fn recover(&self, op: CacheOp) {
        lock(&self.failures).remove(&op);
    }

    fn check(&self, op: CacheOp) -> Result<(), UserCacheError> {
        lock(&self.failures).get(&op).cloned().map_or(Ok(()), Err)
    }
}

#[async_trait]
impl UserCache for InMemoryUserCache {
    async fn get(&self, id: UserId) -> Result<Option<String>, UserCacheError> {
        self.log.push(format!("cache.get:{id}"));
        self.check(CacheOp::Get)?;
        Ok(self.entry(id).filter(|payload| !payload.is_empty()))
    }

    async fn set(&self, id: UserId, record: &str) -> Result<(), UserCacheError> {
        self.log.push(format!("cache.set:{id}"));
        self.check(CacheOp::Set)?;
        self.put(id, record);
        Ok(())
    }

    async fn delete(&self, id: UserId) -> Result<(), UserCacheError> {
        self.log.push(format!("cache.delete:{id}"));
        self.check(CacheOp::Delete)?;
        lock(&self.entries).remove(&id.get());
        Ok(())
    }

    async fn ping(&self) -> Result<(), UserCacheError> {
        self.check(CacheOp::Ping)
    }
}

/// Queue double that remembers every accepted job.
#[derive(Debug, Default)]
pub struct RecordingUserQueue {
    jobs: Mutex<Vec<(QueueName, UserId)>>,
    failure: Mutex<Option<UserQueueError>>,
    log: CallLog,
}

impl RecordingUserQueue {
    /// Queue with no jobs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record calls into `log`.
    pub fn with_log(mut self, log: CallLog) -> Self {
        self.log = log;
        self
    }

    /// Jobs accepted so far, oldest first.
    pub fn jobs(&self) -> Vec<(QueueName, UserId)> {
        lock(&self.jobs).clone()
    }

    /// Reject subsequent jobs with `error`; `None` restores service.
    pub fn fail_with(&self, error: Option<UserQueueError>) {
        *lock(&self.failure) = error;
    }
}

#[async_trait]
impl UserQueue for RecordingUserQueue {
    async fn enqueue(&self, queue: &QueueName, id: UserId) -> Result<(), UserQueueError> {
        self.log.push(format!("queue.enqueue:{id}"));
        if let Some(error) = lock(&self.failure).clone() {
            return Err(error);
        }
        lock(&self.jobs).push((queue.clone(), id));
        Ok(())
    }
}
