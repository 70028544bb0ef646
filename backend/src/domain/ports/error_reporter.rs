//! Out-of-band error reporting hook.

use crate::domain::{Error, UserId};

/// Where an error was raised, attached to each report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportContext {
    operation: &'static str,
    user_id: Option<UserId>,
}

impl ReportContext {
    /// Context for a coordinator operation.
    pub fn new(operation: &'static str) -> Self {
        Self {
            operation,
            user_id: None,
        }
    }

    /// Attach the user the operation targeted.
    pub fn with_user(mut self, user_id: UserId) -> Self {
        self.user_id = Some(user_id);
        self
    }

    /// Operation name, e.g. `get_user`.
    pub fn operation(&self) -> &'static str {
        self.operation
    }

    /// Targeted user, when the operation had one.
    pub fn user_id(&self) -> Option<UserId> {
        self.user_id
    }
}

/// Sink for errors that should be captured outside the request/response path.
///
/// Reporting never fails and never blocks the caller on delivery.
#[cfg_attr(test, mockall::automock)]
pub trait ErrorReporter: Send + Sync {
    /// Capture `error` with its `context`.
    fn report(&self, error: &Error, context: &ReportContext);
}

/// Reporter that drops everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpErrorReporter;

impl ErrorReporter for NoOpErrorReporter {
    fn report(&self, _error: &Error, _context: &ReportContext) {}
}
