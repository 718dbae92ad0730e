use super::TaskCommand;
use crate::time_arg::parse_timestamp;
use crate::{print_json, resolve_user};
use lifehub_core::db::Connection;
use lifehub_core::now_epoch_ms;
use lifehub_core::repo::task_repo::SqliteTaskRepository;
use lifehub_core::service::task_service::{NewTask, TaskPatch, TaskService};

pub fn run(conn: &Connection, cmd: TaskCommand) -> anyhow::Result<()> {
    let service = TaskService::new(SqliteTaskRepository::new(conn));

    match cmd {
        TaskCommand::Add {
            who,
            title,
            priority,
            due,
            minutes,
        } => {
            let user = resolve_user(conn, &who.user)?;
            let input = NewTask {
                title,
                priority,
                due_at: due.as_deref().map(parse_timestamp).transpose()?,
                estimated_minutes: minutes,
                ..NewTask::default()
            };
            print_json(&service.create_task(user.id, input, now_epoch_ms())?)
        }
        TaskCommand::List { who } => {
            let user = resolve_user(conn, &who.user)?;
            print_json(&service.list_tasks(user.id)?)
        }
        TaskCommand::Done { who, id } => {
            let user = resolve_user(conn, &who.user)?;
            let patch = TaskPatch {
                completed: Some(true),
                ..TaskPatch::default()
            };
            print_json(&service.update_task(user.id, id, patch)?)
        }
        TaskCommand::Delete { who, id } => {
            let user = resolve_user(conn, &who.user)?;
            service.delete_task(user.id, id)?;
            println!("deleted {id}");
            Ok(())
        }
    }
}
