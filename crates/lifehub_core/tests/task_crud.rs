use lifehub_core::model::task::{TaskPriority, TaskValidationError};
use lifehub_core::model::MS_PER_HOUR;
use lifehub_core::repo::task_repo::SqliteTaskRepository;
use lifehub_core::repo::user_repo::SqliteUserRepository;
use lifehub_core::service::task_service::{NewTask, TaskPatch, TaskService};
use lifehub_core::service::user_service::UserService;
use lifehub_core::{open_db_in_memory, ServiceError, UserProfile, ValidationError};
use rusqlite::Connection;

const NOW: i64 = 1_700_000_000_000;

fn register(conn: &Connection, name: &str, email: &str) -> UserProfile {
    UserService::new(SqliteUserRepository::new(conn))
        .register(name, email)
        .unwrap()
}

fn new_task(title: &str, priority: Option<&str>, due_at: Option<i64>) -> NewTask {
    NewTask {
        title: title.to_string(),
        priority: priority.map(str::to_string),
        due_at,
        ..NewTask::default()
    }
}

#[test]
fn create_get_update_delete_round_trip() {
    let conn = open_db_in_memory().unwrap();
    let user = register(&conn, "Ada", "ada@example.com");
    let service = TaskService::new(SqliteTaskRepository::new(&conn));

    let created = service
        .create_task(
            user.id,
            NewTask {
                estimated_minutes: Some(15),
                ..new_task("  File taxes ", Some("HIGH"), Some(NOW + MS_PER_HOUR))
            },
            NOW,
        )
        .unwrap();
    assert_eq!(created.title, "File taxes");
    assert_eq!(created.priority, TaskPriority::High);
    assert_eq!(created.created_at, NOW);
    assert_eq!(created.estimated_minutes, Some(15));
    assert!(!created.completed);

    let updated = service
        .update_task(
            user.id,
            created.id,
            TaskPatch {
                completed: Some(true),
                due_at: Some(None),
                ..TaskPatch::default()
            },
        )
        .unwrap();
    assert!(updated.completed);
    assert_eq!(updated.due_at, None);

    let loaded = service.get_task(user.id, created.id).unwrap().unwrap();
    assert_eq!(loaded, updated);

    service.delete_task(user.id, created.id).unwrap();
    assert!(service.get_task(user.id, created.id).unwrap().is_none());
}

#[test]
fn missing_priority_defaults_to_medium_and_unknown_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let user = register(&conn, "Ada", "ada@example.com");
    let service = TaskService::new(SqliteTaskRepository::new(&conn));

    let task = service
        .create_task(user.id, new_task("Call plumber", None, None), NOW)
        .unwrap();
    assert_eq!(task.priority, TaskPriority::Medium);

    let err = service
        .create_task(user.id, new_task("Nope", Some("urgent"), None), NOW)
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Invalid(ValidationError::Task(TaskValidationError::UnknownPriority(_)))
    ));
    assert!(err.is_client_error());
    assert_eq!(service.list_tasks(user.id).unwrap().len(), 1);
}

#[test]
fn blank_title_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let user = register(&conn, "Ada", "ada@example.com");
    let service = TaskService::new(SqliteTaskRepository::new(&conn));

    let err = service
        .create_task(user.id, new_task("   ", None, None), NOW)
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Invalid(ValidationError::Task(TaskValidationError::EmptyTitle))
    ));
}

#[test]
fn list_orders_by_due_date_with_undated_tasks_last() {
    let conn = open_db_in_memory().unwrap();
    let user = register(&conn, "Ada", "ada@example.com");
    let service = TaskService::new(SqliteTaskRepository::new(&conn));

    service
        .create_task(user.id, new_task("undated", None, None), NOW)
        .unwrap();
    service
        .create_task(user.id, new_task("later", None, Some(NOW + 5 * MS_PER_HOUR)), NOW)
        .unwrap();
    service
        .create_task(user.id, new_task("sooner", None, Some(NOW + MS_PER_HOUR)), NOW)
        .unwrap();

    let titles = service
        .list_tasks(user.id)
        .unwrap()
        .into_iter()
        .map(|task| task.title)
        .collect::<Vec<_>>();
    assert_eq!(titles, vec!["sooner", "later", "undated"]);
}

#[test]
fn tasks_are_scoped_to_their_owner() {
    let conn = open_db_in_memory().unwrap();
    let ada = register(&conn, "Ada", "ada@example.com");
    let bob = register(&conn, "Bob", "bob@example.com");
    let service = TaskService::new(SqliteTaskRepository::new(&conn));

    let task = service
        .create_task(ada.id, new_task("Ada's task", None, None), NOW)
        .unwrap();

    assert!(service.get_task(bob.id, task.id).unwrap().is_none());
    assert!(service.list_tasks(bob.id).unwrap().is_empty());

    let err = service
        .update_task(
            bob.id,
            task.id,
            TaskPatch {
                completed: Some(true),
                ..TaskPatch::default()
            },
        )
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(id) if id == task.id));

    let err = service.delete_task(bob.id, task.id).unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(id) if id == task.id));
    assert!(service.get_task(ada.id, task.id).unwrap().is_some());
}

#[test]
fn duplicate_email_registration_is_a_conflict() {
    let conn = open_db_in_memory().unwrap();
    let users = UserService::new(SqliteUserRepository::new(&conn));

    let ada = users.register("Ada", "Ada@Example.com").unwrap();
    assert_eq!(ada.email, "ada@example.com");

    let err = users.register("Other Ada", "ada@example.com ").unwrap_err();
    assert!(matches!(err, ServiceError::AlreadyExists(_)));
    assert!(err.is_client_error());

    let found = users.find_by_email("ADA@example.com").unwrap().unwrap();
    assert_eq!(found, ada);
    assert_eq!(users.get_user(ada.id).unwrap(), ada);
}
