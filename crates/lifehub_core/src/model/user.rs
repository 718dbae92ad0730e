//! User profile model.
//!
//! Profiles are resolved by the authentication collaborator; core only keeps
//! the identity, display name and mail address needed to own records and
//! address digests.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a user.
pub type UserId = Uuid;

/// Resolved identity attached to each use-case call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    /// Display name used in digest greetings.
    pub name: String,
    /// Lowercased mail address.
    pub email: String,
}

/// Validation errors for [`UserProfile`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    NilId,
    EmptyName,
    InvalidEmail(String),
}

impl Display for UserValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "user id must not be nil"),
            Self::EmptyName => write!(f, "user name must not be empty"),
            Self::InvalidEmail(value) => write!(f, "invalid email address: `{value}`"),
        }
    }
}

impl Error for UserValidationError {}

impl UserProfile {
    /// Creates a profile with a generated ID and normalized fields.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), name, email)
    }

    /// Creates a profile with a caller-provided ID.
    ///
    /// Name is trimmed, email is trimmed and lowercased. Validity is checked
    /// separately by [`UserProfile::validate`].
    pub fn with_id(id: UserId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into().trim().to_string(),
            email: email.into().trim().to_ascii_lowercase(),
        }
    }

    pub fn validate(&self) -> Result<(), UserValidationError> {
        if self.id.is_nil() {
            return Err(UserValidationError::NilId);
        }
        if self.name.trim().is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        if !is_plausible_email(&self.email) {
            return Err(UserValidationError::InvalidEmail(self.email.clone()));
        }
        Ok(())
    }
}

fn is_plausible_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty() && !domain.is_empty() && !value.chars().any(char::is_whitespace)
}
