//! Shared HTTP adapter state.
//!
//! Handlers receive this through `actix_web::web::Data` so they depend only
//! on driving ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{HealthCheck, UserAccess};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// User operations.
    pub users: Arc<dyn UserAccess>,
    /// Dependency probe behind `/healthcheck`.
    pub health: Arc<dyn HealthCheck>,
}

impl HttpState {
    /// Bundle the driving ports.
    pub fn new(users: Arc<dyn UserAccess>, health: Arc<dyn HealthCheck>) -> Self {
        Self { users, health }
    }
}
