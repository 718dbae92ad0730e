//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Validate caller input before it reaches persistence.
//! - Keep outer layers (CLI, HTTP) decoupled from storage details.

use crate::model::event::EventValidationError;
use crate::model::grocery::GroceryValidationError;
use crate::model::task::TaskValidationError;
use crate::model::user::UserValidationError;
use crate::repo::{RepoError, ValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub mod event_service;
pub mod grocery_service;
pub mod reminder_service;
pub mod task_service;
pub mod user_service;

/// Error shared by CRUD-style services.
#[derive(Debug)]
pub enum ServiceError {
    /// Caller input or record state violates a validation rule.
    Invalid(ValidationError),
    /// Target record does not exist for this user.
    NotFound(Uuid),
    /// Persistence-layer failure.
    Repo(RepoError),
    /// A record with the same unique key already exists.
    AlreadyExists(&'static str),
    /// Internal consistency mismatch between write and read-back.
    InconsistentState(&'static str),
}

impl ServiceError {
    /// Whether the failure was caused by the request rather than the server.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Invalid(_) | Self::NotFound(_) | Self::AlreadyExists(_)
        )
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Invalid(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::AlreadyExists(what) => write!(f, "{what} already exists"),
            Self::InconsistentState(details) => write!(f, "inconsistent state: {details}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Invalid(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NotFound(id),
            RepoError::Validation(err) => Self::Invalid(err),
            other => Self::Repo(other),
        }
    }
}

impl From<TaskValidationError> for ServiceError {
    fn from(value: TaskValidationError) -> Self {
        Self::Invalid(ValidationError::Task(value))
    }
}

impl From<EventValidationError> for ServiceError {
    fn from(value: EventValidationError) -> Self {
        Self::Invalid(ValidationError::Event(value))
    }
}

impl From<GroceryValidationError> for ServiceError {
    fn from(value: GroceryValidationError) -> Self {
        Self::Invalid(ValidationError::Grocery(value))
    }
}

impl From<UserValidationError> for ServiceError {
    fn from(value: UserValidationError) -> Self {
        Self::Invalid(ValidationError::User(value))
    }
}
