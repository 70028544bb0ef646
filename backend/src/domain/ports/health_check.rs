//! Driving port for dependency health probes.

use async_trait::async_trait;

/// Aggregate probe outcome.
///
/// Failures are deliberately not broken down by dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthStatus {
    /// Every dependency answered.
    Ok,
    /// At least one dependency did not.
    Critical,
}

impl HealthStatus {
    /// Text body reported by probes.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Critical => "CRITICAL",
        }
    }
}

/// Probe reachable cache and store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HealthCheck: Send + Sync {
    /// Ping every dependency and fold the results.
    async fn check(&self) -> HealthStatus;
}
