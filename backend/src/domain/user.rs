//! User record model.
//!
//! A [`User`] is a standalone record: an identity assigned by the store's
//! sequence generator plus a name and an email address. Client input arrives
//! as a [`UserDraft`], which is validated before any cache or store access and
//! never carries an identity of its own.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Maximum accepted length of a user name, in characters.
pub const NAME_MAX: usize = 255;
/// Maximum accepted length of an email address, in characters.
pub const EMAIL_MAX: usize = 254;

/// Validation errors returned by [`UserDraft::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// Name is empty once trimmed.
    #[error("name must not be empty")]
    EmptyName,
    /// Name exceeds [`NAME_MAX`] characters.
    #[error("name must be at most {max} characters")]
    NameTooLong {
        /// Permitted maximum.
        max: usize,
    },
    /// Email is empty once trimmed.
    #[error("email must not be empty")]
    EmptyEmail,
    /// Email exceeds [`EMAIL_MAX`] characters.
    #[error("email must be at most {max} characters")]
    EmailTooLong {
        /// Permitted maximum.
        max: usize,
    },
    /// Email is not of the form `local@domain`.
    #[error("email must look like local@domain")]
    MalformedEmail,
}

/// Store-assigned user identifier.
///
/// `0` is the unassigned sentinel: it only appears on records that have not
/// yet been through identity allocation.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Sentinel carried before a create completes.
    pub const UNASSIGNED: Self = Self(0);

    /// Wrap a raw identifier.
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw integer value.
    pub const fn get(self) -> i64 {
        self.0
    }

    /// Whether the identifier came from the sequence generator.
    pub const fn is_assigned(self) -> bool {
        self.0 != 0
    }
}

impl From<i64> for UserId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validated client-supplied user attributes, without identity.
///
/// # Examples
/// ```
/// use users_service::domain::UserDraft;
///
/// let draft = UserDraft::new("Ada", "ada@x.io").expect("valid draft");
/// assert_eq!(draft.name(), "Ada");
/// assert!(UserDraft::new("Ada", "not-an-email").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDraft {
    name: String,
    email: String,
}

impl UserDraft {
    /// Validate and construct a draft.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<Self, UserValidationError> {
        let name = name.into();
        let email = email.into();

        if name.trim().is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        if name.chars().count() > NAME_MAX {
            return Err(UserValidationError::NameTooLong { max: NAME_MAX });
        }
        validate_email(&email)?;

        Ok(Self { name, email })
    }

    /// Name as supplied.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Email as supplied.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Bind the draft to an identity, producing a complete record.
    pub fn into_user(self, id: UserId) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
        }
    }
}

fn validate_email(email: &str) -> Result<(), UserValidationError> {
    if email.trim().is_empty() {
        return Err(UserValidationError::EmptyEmail);
    }
    if email.chars().count() > EMAIL_MAX {
        return Err(UserValidationError::EmailTooLong { max: EMAIL_MAX });
    }
    if email.chars().any(char::is_whitespace) {
        return Err(UserValidationError::MalformedEmail);
    }
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => {
            Ok(())
        }
        _ => Err(UserValidationError::MalformedEmail),
    }
}

/// User record.
///
/// This is also the serialised form kept in the cache and returned over
/// HTTP: `{"id":1,"name":"Ada","email":"ada@x.io"}`.
///
/// ## Invariants
/// - `id` never changes once assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    #[schema(value_type = i64, example = 1)]
    id: UserId,
    #[schema(example = "Ada")]
    name: String,
    #[schema(example = "ada@x.io")]
    email: String,
}

impl User {
    /// Rehydrate a record from storage without re-running draft validation.
    ///
    /// Rows written before validation rules tightened must stay readable, so
    /// adapters use this rather than [`UserDraft::new`].
    pub fn from_parts(id: UserId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
        }
    }

    /// Store-assigned identifier.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Contact email address.
    pub fn email(&self) -> &str {
        &self.email
    }
}

#[cfg(test)]
mod tests;
