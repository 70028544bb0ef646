//! Producer-side port for asynchronous user work queues.
//!
//! The only contract is "accepted for later processing": an `Ok` means the
//! backend acknowledged the hand-off. Neither at-least-once nor exactly-once
//! delivery is promised by the port; see the adapter for what its backend
//! actually guarantees.
use async_trait::async_trait;

use crate::domain::UserId;

use super::{QueueName, define_port_error};

define_port_error! {
    /// Errors surfaced by the queue producer adapter.
    pub enum UserQueueError {
        /// Queue infrastructure is unavailable.
        Unavailable { message: String } => "user queue is unavailable: {message}",
        /// The backend refused to acknowledge the job.
        Rejected { message: String } => "user job was rejected: {message}",
    }
}

/// Fire-and-forget producer keyed by user identifier.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserQueue: Send + Sync {
    /// Hand `id` to the named queue and wait for the acknowledgement.
    async fn enqueue(&self, queue: &QueueName, id: UserId) -> Result<(), UserQueueError>;
}
