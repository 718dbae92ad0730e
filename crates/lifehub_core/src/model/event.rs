//! Calendar event model.
//!
//! # Invariants
//! - `end_at` is never earlier than `start_at`.
//! - `title` is non-empty after trimming.

use crate::model::user::UserId;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a calendar event.
pub type EventId = Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: EventId,
    pub user_id: UserId,
    pub title: String,
    /// Epoch milliseconds.
    pub start_at: i64,
    /// Epoch milliseconds. Must be >= `start_at`.
    pub end_at: i64,
    #[serde(default)]
    pub description: String,
}

/// Validation errors for [`CalendarEvent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventValidationError {
    NilId,
    EmptyTitle,
    InvalidWindow { start: i64, end: i64 },
}

impl Display for EventValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "event id must not be nil"),
            Self::EmptyTitle => write!(f, "event title must not be empty"),
            Self::InvalidWindow { start, end } => {
                write!(f, "end_at ({end}) must be >= start_at ({start})")
            }
        }
    }
}

impl Error for EventValidationError {}

impl CalendarEvent {
    pub fn new(user_id: UserId, title: impl Into<String>, start_at: i64, end_at: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            title: title.into(),
            start_at,
            end_at,
            description: String::new(),
        }
    }

    pub fn validate(&self) -> Result<(), EventValidationError> {
        if self.id.is_nil() {
            return Err(EventValidationError::NilId);
        }
        if self.title.trim().is_empty() {
            return Err(EventValidationError::EmptyTitle);
        }
        if self.end_at < self.start_at {
            return Err(EventValidationError::InvalidWindow {
                start: self.start_at,
                end: self.end_at,
            });
        }
        Ok(())
    }
}
