//! Task use-case service.
//!
//! # Responsibility
//! - Validate caller input (title, priority string, estimate) before persistence.
//! - Provide user-scoped create/update/get/list/delete entry points.
//!
//! # Invariants
//! - Unknown priority strings are rejected, never coerced.
//! - A missing priority defaults to `medium`.
//! - Service APIs never bypass repository validation.

use crate::model::task::{Task, TaskId, TaskPriority};
use crate::model::user::UserId;
use crate::repo::task_repo::{TaskListQuery, TaskRepository};
use crate::service::ServiceError;
use log::info;
use uuid::Uuid;

/// Input for creating a task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTask {
    /// Client-generated ID. A new one is generated when absent.
    pub id: Option<TaskId>,
    pub title: String,
    /// Raw priority string from the caller (`low|medium|high`).
    pub priority: Option<String>,
    pub due_at: Option<i64>,
    pub completed: bool,
    pub estimated_minutes: Option<u32>,
}

/// Partial update. `None` leaves a field unchanged; `Some(None)` clears an
/// optional field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub priority: Option<String>,
    pub due_at: Option<Option<i64>>,
    pub completed: Option<bool>,
    pub estimated_minutes: Option<Option<u32>>,
}

/// Use-case service wrapper for task operations.
pub struct TaskService<R: TaskRepository> {
    repo: R,
}

impl<R: TaskRepository> TaskService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a task owned by `user_id`, stamped with `now_ms` as creation time.
    pub fn create_task(
        &self,
        user_id: UserId,
        input: NewTask,
        now_ms: i64,
    ) -> Result<Task, ServiceError> {
        let priority = parse_priority(input.priority.as_deref())?;
        let id = input.id.unwrap_or_else(Uuid::new_v4);

        let mut task = Task::with_id(id, user_id, input.title.trim(), now_ms);
        task.priority = priority;
        task.due_at = input.due_at;
        task.completed = input.completed;
        task.estimated_minutes = input.estimated_minutes;

        let task_id = self.repo.create_task(&task)?;
        info!("event=task_create module=service status=ok priority={priority}");

        self.repo
            .get_task(user_id, task_id)?
            .ok_or(ServiceError::InconsistentState(
                "created task not found in read-back",
            ))
    }

    /// Applies `patch` to an existing task.
    ///
    /// Returns `ServiceError::NotFound` when the task does not exist for this user.
    pub fn update_task(
        &self,
        user_id: UserId,
        task_id: TaskId,
        patch: TaskPatch,
    ) -> Result<Task, ServiceError> {
        let mut task = self
            .repo
            .get_task(user_id, task_id)?
            .ok_or(ServiceError::NotFound(task_id))?;

        if let Some(title) = patch.title {
            task.title = title.trim().to_string();
        }
        if let Some(priority) = patch.priority {
            task.priority = parse_priority(Some(priority.as_str()))?;
        }
        if let Some(due_at) = patch.due_at {
            task.due_at = due_at;
        }
        if let Some(completed) = patch.completed {
            task.completed = completed;
        }
        if let Some(estimated_minutes) = patch.estimated_minutes {
            task.estimated_minutes = estimated_minutes;
        }

        self.repo.update_task(&task)?;
        Ok(task)
    }

    pub fn get_task(&self, user_id: UserId, task_id: TaskId) -> Result<Option<Task>, ServiceError> {
        Ok(self.repo.get_task(user_id, task_id)?)
    }

    /// Lists every task of `user_id`, earliest due date first.
    pub fn list_tasks(&self, user_id: UserId) -> Result<Vec<Task>, ServiceError> {
        Ok(self.repo.list_tasks(&TaskListQuery::all(user_id))?)
    }

    pub fn delete_task(&self, user_id: UserId, task_id: TaskId) -> Result<(), ServiceError> {
        self.repo.delete_task(user_id, task_id)?;
        info!("event=task_delete module=service status=ok");
        Ok(())
    }
}

fn parse_priority(value: Option<&str>) -> Result<TaskPriority, ServiceError> {
    match value {
        Some(raw) => Ok(raw.parse::<TaskPriority>()?),
        None => Ok(TaskPriority::default()),
    }
}
