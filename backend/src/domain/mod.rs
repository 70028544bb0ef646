//! Domain entities, ports and the services implementing the driving ports.
//!
//! Public surface:
//! - `User`, `UserId`, `UserDraft`: the record and its identity.
//! - `Error` (alias of `DomainError`), `ErrorCode`: transport-agnostic failures.
//! - `TraceId`: per-request correlation id.
//! - `UserAccessService`: cache-aside coordinator behind `ports::UserAccess`.
//! - `DependencyHealthService`: dependency probe behind `ports::HealthCheck`.

pub mod error;
pub mod health_service;
pub mod list_window;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod user_access_service;

pub use self::error::{DomainError, DomainError as Error, ErrorCode, ErrorValidationError};
pub use self::health_service::DependencyHealthService;
pub use self::list_window::{DEFAULT_LIST_COUNT, ListWindow, MAX_LIST_COUNT};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{EMAIL_MAX, NAME_MAX, User, UserDraft, UserId, UserValidationError};
pub use self::user_access_service::{USER_NOT_FOUND_MESSAGE, UserAccessService};
