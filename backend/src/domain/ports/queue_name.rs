//! Validated queue name shared by queue producers.
use std::fmt;

use thiserror::Error;

/// Queue notified after a user record is created.
pub const CREATE_USER_QUEUE: &str = "CREATE_USER";

/// Name of an asynchronous work queue.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueueName(String);

impl QueueName {
    /// Construct a queue name after checking it is non-empty and free of
    /// whitespace.
    pub fn new(value: impl Into<String>) -> Result<Self, QueueNameValidationError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(QueueNameValidationError::Empty);
        }
        if raw.chars().any(char::is_whitespace) {
            return Err(QueueNameValidationError::ContainsWhitespace);
        }
        Ok(Self(raw))
    }

    /// The well-known create-notification queue.
    pub fn create_user() -> Self {
        Self(CREATE_USER_QUEUE.to_owned())
    }

    /// Borrow the underlying name.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Default for QueueName {
    fn default() -> Self {
        Self::create_user()
    }
}

impl fmt::Display for QueueName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for QueueName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Validation errors returned when constructing [`QueueName`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueueNameValidationError {
    /// Name is empty after trimming whitespace.
    #[error("queue name must not be empty")]
    Empty,
    /// Name contains whitespace.
    #[error("queue name must not contain whitespace")]
    ContainsWhitespace,
}
