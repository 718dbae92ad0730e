//! Task domain model.
//!
//! # Responsibility
//! - Define the task record that urgency scoring reads.
//! - Own priority parsing used by caller-side validation.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - `title` is non-empty after trimming.
//! - `estimated_minutes`, when present, is strictly positive.
//! - Scores are never stored on the task; see `scoring::urgency`.

use crate::model::user::UserId;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Stable identifier for a task.
pub type TaskId = Uuid;

/// Importance tier chosen by the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    /// Used when the caller does not specify a priority.
    #[default]
    Medium,
    High,
}

impl TaskPriority {
    /// Stable lowercase name used in storage and wire formats.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl Display for TaskPriority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskPriority {
    type Err = TaskValidationError;

    /// Parses `low|medium|high` case-insensitively. Unknown values are
    /// rejected rather than coerced.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(TaskValidationError::UnknownPriority(value.to_string())),
        }
    }
}

/// Canonical task record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    /// Owner; every query is scoped by this field.
    pub user_id: UserId,
    pub title: String,
    #[serde(default)]
    pub priority: TaskPriority,
    /// Epoch milliseconds. `None` means the task has no deadline.
    pub due_at: Option<i64>,
    /// Epoch milliseconds, set once at creation.
    pub created_at: i64,
    #[serde(default)]
    pub completed: bool,
    /// Caller estimate of effort. Must be positive when present.
    #[serde(default)]
    pub estimated_minutes: Option<u32>,
}

/// Validation errors for [`Task`] and task input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    NilId,
    EmptyTitle,
    UnknownPriority(String),
    NonPositiveEstimate,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "task id must not be nil"),
            Self::EmptyTitle => write!(f, "task title must not be empty"),
            Self::UnknownPriority(value) => {
                write!(f, "unknown task priority `{value}`; expected low|medium|high")
            }
            Self::NonPositiveEstimate => write!(f, "estimated_minutes must be positive"),
        }
    }
}

impl Error for TaskValidationError {}

impl Task {
    /// Creates an open task with a generated ID and default priority.
    pub fn new(user_id: UserId, title: impl Into<String>, created_at: i64) -> Self {
        Self::with_id(Uuid::new_v4(), user_id, title, created_at)
    }

    /// Creates an open task with a caller-provided ID.
    ///
    /// Used when the client generates identifiers before syncing.
    pub fn with_id(
        id: TaskId,
        user_id: UserId,
        title: impl Into<String>,
        created_at: i64,
    ) -> Self {
        Self {
            id,
            user_id,
            title: title.into(),
            priority: TaskPriority::default(),
            due_at: None,
            created_at,
            completed: false,
            estimated_minutes: None,
        }
    }

    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.id.is_nil() {
            return Err(TaskValidationError::NilId);
        }
        if self.title.trim().is_empty() {
            return Err(TaskValidationError::EmptyTitle);
        }
        if self.estimated_minutes == Some(0) {
            return Err(TaskValidationError::NonPositiveEstimate);
        }
        Ok(())
    }

    /// Returns whether the task still needs attention.
    pub fn is_open(&self) -> bool {
        !self.completed
    }
}

#[cfg(test)]
mod tests {
    use super::{Task, TaskPriority, TaskValidationError};
    use uuid::Uuid;

    #[test]
    fn priority_parse_is_case_insensitive_and_strict() {
        assert_eq!(" HIGH ".parse::<TaskPriority>(), Ok(TaskPriority::High));
        assert_eq!("low".parse::<TaskPriority>(), Ok(TaskPriority::Low));
        assert_eq!(
            "urgent".parse::<TaskPriority>(),
            Err(TaskValidationError::UnknownPriority("urgent".to_string()))
        );
    }

    #[test]
    fn new_task_defaults_to_open_medium_priority() {
        let task = Task::new(Uuid::new_v4(), "file taxes", 1_000);
        assert_eq!(task.priority, TaskPriority::Medium);
        assert!(task.is_open());
        assert!(task.validate().is_ok());
    }

    #[test]
    fn validate_rejects_blank_title_and_zero_estimate() {
        let mut task = Task::new(Uuid::new_v4(), "   ", 1_000);
        assert_eq!(task.validate(), Err(TaskValidationError::EmptyTitle));

        task.title = "call bank".to_string();
        task.estimated_minutes = Some(0);
        assert_eq!(task.validate(), Err(TaskValidationError::NonPositiveEstimate));
    }

    #[test]
    fn missing_priority_deserializes_as_medium() {
        let value = serde_json::json!({
            "id": "11111111-2222-4333-8444-555555555555",
            "user_id": "11111111-2222-4333-8444-666666666666",
            "title": "water plants",
            "due_at": null,
            "created_at": 0
        });
        let task: Task = serde_json::from_value(value).unwrap();
        assert_eq!(task.priority, TaskPriority::Medium);
        assert!(!task.completed);
        assert_eq!(task.estimated_minutes, None);
    }
}
