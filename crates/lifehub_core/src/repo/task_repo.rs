//! Task repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide user-scoped CRUD over the `tasks` table.
//! - Serve the open-task snapshot that reminder selection scores.
//!
//! # Invariants
//! - Write paths call `Task::validate()` before SQL mutations.
//! - Read paths reject invalid persisted state instead of masking it.
//! - List order is `due_at ASC` (no due date last), then `created_at ASC`.

use crate::model::task::{Task, TaskId, TaskPriority};
use crate::model::user::UserId;
use crate::repo::{bool_to_int, parse_bool, parse_uuid, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const TASK_SELECT_SQL: &str = "SELECT
    id,
    user_id,
    title,
    priority,
    due_at,
    created_at,
    completed,
    estimated_minutes
FROM tasks";

/// Query options for listing one user's tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskListQuery {
    pub user_id: UserId,
    /// When set, completed tasks are excluded in SQL.
    pub incomplete_only: bool,
}

impl TaskListQuery {
    /// Every task owned by `user_id`.
    pub fn all(user_id: UserId) -> Self {
        Self {
            user_id,
            incomplete_only: false,
        }
    }

    /// Only tasks not yet completed.
    pub fn open(user_id: UserId) -> Self {
        Self {
            user_id,
            incomplete_only: true,
        }
    }
}

/// Repository interface for task CRUD operations.
pub trait TaskRepository {
    fn create_task(&self, task: &Task) -> RepoResult<TaskId>;
    fn update_task(&self, task: &Task) -> RepoResult<()>;
    fn get_task(&self, user_id: UserId, id: TaskId) -> RepoResult<Option<Task>>;
    fn list_tasks(&self, query: &TaskListQuery) -> RepoResult<Vec<Task>>;
    fn delete_task(&self, user_id: UserId, id: TaskId) -> RepoResult<()>;
}

/// SQLite-backed task repository.
pub struct SqliteTaskRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl TaskRepository for SqliteTaskRepository<'_> {
    fn create_task(&self, task: &Task) -> RepoResult<TaskId> {
        task.validate()?;

        self.conn.execute(
            "INSERT INTO tasks (
                id,
                user_id,
                title,
                priority,
                due_at,
                created_at,
                completed,
                estimated_minutes
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);",
            params![
                task.id.to_string(),
                task.user_id.to_string(),
                task.title.as_str(),
                task.priority.as_str(),
                task.due_at,
                task.created_at,
                bool_to_int(task.completed),
                task.estimated_minutes,
            ],
        )?;

        Ok(task.id)
    }

    fn update_task(&self, task: &Task) -> RepoResult<()> {
        task.validate()?;

        let changed = self.conn.execute(
            "UPDATE tasks
             SET
                title = ?1,
                priority = ?2,
                due_at = ?3,
                completed = ?4,
                estimated_minutes = ?5,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?6
               AND user_id = ?7;",
            params![
                task.title.as_str(),
                task.priority.as_str(),
                task.due_at,
                bool_to_int(task.completed),
                task.estimated_minutes,
                task.id.to_string(),
                task.user_id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(task.id));
        }

        Ok(())
    }

    fn get_task(&self, user_id: UserId, id: TaskId) -> RepoResult<Option<Task>> {
        let mut stmt = self.conn.prepare(&format!(
            "{TASK_SELECT_SQL}
             WHERE id = ?1
               AND user_id = ?2;"
        ))?;

        let mut rows = stmt.query(params![id.to_string(), user_id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_task_row(row)?));
        }

        Ok(None)
    }

    fn list_tasks(&self, query: &TaskListQuery) -> RepoResult<Vec<Task>> {
        let mut sql = format!("{TASK_SELECT_SQL} WHERE user_id = ?1");
        if query.incomplete_only {
            sql.push_str(" AND completed = 0");
        }
        sql.push_str(" ORDER BY due_at IS NULL, due_at ASC, created_at ASC, id ASC");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query([query.user_id.to_string()])?;
        let mut tasks = Vec::new();

        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }

        Ok(tasks)
    }

    fn delete_task(&self, user_id: UserId, id: TaskId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM tasks WHERE id = ?1 AND user_id = ?2;",
            params![id.to_string(), user_id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

fn parse_task_row(row: &Row<'_>) -> RepoResult<Task> {
    let id_text: String = row.get("id")?;
    let user_text: String = row.get("user_id")?;

    let priority_text: String = row.get("priority")?;
    let priority = priority_text.parse::<TaskPriority>().map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid task priority `{priority_text}` in tasks.priority"
        ))
    })?;

    let estimated_minutes = match row.get::<_, Option<i64>>("estimated_minutes")? {
        Some(value) => Some(u32::try_from(value).map_err(|_| {
            RepoError::InvalidData(format!(
                "invalid estimate `{value}` in tasks.estimated_minutes"
            ))
        })?),
        None => None,
    };

    let task = Task {
        id: parse_uuid(&id_text, "tasks.id")?,
        user_id: parse_uuid(&user_text, "tasks.user_id")?,
        title: row.get("title")?,
        priority,
        due_at: row.get("due_at")?,
        created_at: row.get("created_at")?,
        completed: parse_bool(row.get("completed")?, "tasks.completed")?,
        estimated_minutes,
    };
    task.validate()?;
    Ok(task)
}
