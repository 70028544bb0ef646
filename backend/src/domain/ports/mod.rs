//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`UserRepository`, `UserCache`, `UserQueue`, `ErrorReporter`)
//! are implemented by outbound adapters. Driving ports (`UserAccess`,
//! `HealthCheck`) are implemented by domain services and consumed by the
//! inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod error_reporter;
mod health_check;
mod queue_name;
mod user_access;
mod user_cache;
mod user_queue;
mod user_repository;

#[cfg(test)]
pub use error_reporter::MockErrorReporter;
pub use error_reporter::{ErrorReporter, NoOpErrorReporter, ReportContext};
#[cfg(test)]
pub use health_check::MockHealthCheck;
pub use health_check::{HealthCheck, HealthStatus};
pub use queue_name::{CREATE_USER_QUEUE, QueueName, QueueNameValidationError};
#[cfg(test)]
pub use user_access::MockUserAccess;
pub use user_access::{UserAccess, UserInput};
#[cfg(test)]
pub use user_cache::MockUserCache;
pub use user_cache::{UserCache, UserCacheError};
#[cfg(test)]
pub use user_queue::MockUserQueue;
pub use user_queue::{UserQueue, UserQueueError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
