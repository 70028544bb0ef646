//! Inbound adapters translating HTTP and gRPC requests into calls on the
//! driving ports.
//!
//! The adapters depend on [`crate::domain::ports::UserAccess`] and never on
//! each other.

pub mod grpc;
pub mod http;
