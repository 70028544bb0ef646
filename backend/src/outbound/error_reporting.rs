//! Error reporter that emits captured errors as `tracing` events.
//!
//! Stands in for a hosted error-tracking sink: subscribers can route the
//! `users_service::error_report` target wherever reports should land.

use tracing::error;

use crate::domain::Error;
use crate::domain::ports::{ErrorReporter, ReportContext};

/// [`ErrorReporter`] writing one `error!` event per report.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingErrorReporter;

impl TracingErrorReporter {
    /// Create a reporter.
    pub fn new() -> Self {
        Self
    }
}

impl ErrorReporter for TracingErrorReporter {
    fn report(&self, err: &Error, context: &ReportContext) {
        error!(
            target: "users_service::error_report",
            code = %err.code(),
            message = err.message(),
            trace_id = err.trace_id(),
            operation = context.operation(),
            user_id = context.user_id().map(|id| id.get()),
            "operation failed"
        );
    }
}
