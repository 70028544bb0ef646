//! Outbound adapters implementing the driven ports.
//!
//! - **persistence**: PostgreSQL store accessor using Diesel.
//! - **cache**: Redis record cache and the shared Redis pool.
//! - **queue**: Redis list producer for create notifications.
//! - **error_reporting**: `tracing`-backed error reporter.
//!
//! Adapters translate between domain types and infrastructure
//! representations. They contain no business logic.

pub mod cache;
pub mod error_reporting;
pub mod persistence;
pub mod queue;
