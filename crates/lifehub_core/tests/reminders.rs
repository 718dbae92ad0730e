use lifehub_core::model::{MS_PER_DAY, MS_PER_HOUR};
use lifehub_core::notify::digest::DIGEST_SUBJECT;
use lifehub_core::repo::task_repo::SqliteTaskRepository;
use lifehub_core::repo::user_repo::SqliteUserRepository;
use lifehub_core::service::task_service::{NewTask, TaskService};
use lifehub_core::service::user_service::UserService;
use lifehub_core::{
    open_db_in_memory, MailError, MailMessage, MailReceipt, Mailer, ReminderService,
    ReminderServiceError, UserProfile,
};
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

const NOW: i64 = 1_700_000_000_000;

#[derive(Default)]
struct RecordingMailer {
    sent: Mutex<Vec<MailMessage>>,
}

impl Mailer for RecordingMailer {
    fn send(&self, message: &MailMessage) -> Result<MailReceipt, MailError> {
        self.sent.lock().unwrap().push(message.clone());
        Ok(MailReceipt {
            code: "250".to_string(),
            message: "2.0.0 Ok: queued".to_string(),
        })
    }
}

struct RejectingMailer;

impl Mailer for RejectingMailer {
    fn send(&self, _message: &MailMessage) -> Result<MailReceipt, MailError> {
        Err(MailError::Transport("connection refused".to_string()))
    }
}

fn register(conn: &Connection) -> UserProfile {
    UserService::new(SqliteUserRepository::new(conn))
        .register("Ada", "ada@example.com")
        .unwrap()
}

fn add_task(
    conn: &Connection,
    user: &UserProfile,
    title: &str,
    priority: &str,
    due_at: Option<i64>,
    created_at: i64,
) {
    TaskService::new(SqliteTaskRepository::new(conn))
        .create_task(
            user.id,
            NewTask {
                title: title.to_string(),
                priority: Some(priority.to_string()),
                due_at,
                ..NewTask::default()
            },
            created_at,
        )
        .unwrap();
}

fn complete_all(conn: &Connection) {
    conn.execute("UPDATE tasks SET completed = 1;", []).unwrap();
}

#[test]
fn no_open_tasks_yields_empty_suggestions() {
    let conn = open_db_in_memory().unwrap();
    let user = register(&conn);
    let service = ReminderService::new(SqliteTaskRepository::new(&conn));

    assert!(service.list_suggestions(user.id, NOW).unwrap().is_empty());

    add_task(&conn, &user, "done already", "high", Some(NOW - MS_PER_HOUR), NOW);
    complete_all(&conn);
    assert!(service.list_suggestions(user.id, NOW).unwrap().is_empty());
}

#[test]
fn suggestions_apply_threshold_and_rank_by_score() {
    let conn = open_db_in_memory().unwrap();
    let user = register(&conn);
    // low, no due date, 20 days old: 0
    add_task(&conn, &user, "someday", "low", None, NOW - 20 * MS_PER_DAY);
    // medium, due in 48h, fresh: 15 + 30 + 10 = 55
    add_task(&conn, &user, "report", "medium", Some(NOW + 48 * MS_PER_HOUR), NOW);
    // high, overdue by 1h, 2 days old: 30 + 70 + 8 = 108
    add_task(&conn, &user, "taxes", "high", Some(NOW - MS_PER_HOUR), NOW - 2 * MS_PER_DAY);

    let service = ReminderService::new(SqliteTaskRepository::new(&conn));
    let selection = service.list_suggestions(user.id, NOW).unwrap();

    let ranked = selection
        .iter()
        .map(|scored| (scored.task.title.as_str(), scored.score))
        .collect::<Vec<_>>();
    assert_eq!(ranked, vec![("taxes", 108), ("report", 55)]);
}

#[test]
fn suggestions_are_capped_at_ten() {
    let conn = open_db_in_memory().unwrap();
    let user = register(&conn);
    for index in 0..12 {
        add_task(&conn, &user, &format!("urgent {index}"), "high", Some(NOW - MS_PER_HOUR), NOW);
    }

    let service = ReminderService::new(SqliteTaskRepository::new(&conn));
    assert_eq!(service.list_suggestions(user.id, NOW).unwrap().len(), 10);
}

#[test]
fn digest_sends_top_five_without_threshold() {
    let conn = open_db_in_memory().unwrap();
    let user = register(&conn);
    for index in 0..6 {
        let created_at = NOW - 30 * MS_PER_DAY + index;
        add_task(&conn, &user, &format!("chore {index}"), "low", None, created_at);
    }
    add_task(&conn, &user, "taxes", "high", Some(NOW - MS_PER_HOUR), NOW);

    let mailer = Arc::new(RecordingMailer::default());
    let service =
        ReminderService::new(SqliteTaskRepository::new(&conn)).with_mailer(mailer.clone());

    let report = service.send_digest(&user, NOW).unwrap();
    assert_eq!(report.sent_to, "ada@example.com");
    assert_eq!(report.task_count, 5);
    assert_eq!(report.receipt.code, "250");
    assert_eq!(report.receipt.message, "2.0.0 Ok: queued");

    let sent = mailer.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "ada@example.com");
    assert_eq!(sent[0].subject, DIGEST_SUBJECT);
    assert!(sent[0].text.starts_with("Hello Ada,"));
    assert!(sent[0].text.contains("1. taxes (due 2023-11-14 21:13 UTC)"));
    assert!(sent[0].text.contains("5. chore 3"));
    assert!(!sent[0].text.contains("chore 4"));
}

#[test]
fn digest_without_mailer_is_reported_as_not_configured() {
    let conn = open_db_in_memory().unwrap();
    let user = register(&conn);
    let service = ReminderService::new(SqliteTaskRepository::new(&conn));

    let err = service.send_digest(&user, NOW).unwrap_err();
    assert!(matches!(err, ReminderServiceError::MailerNotConfigured));
    assert!(err.is_client_error());
}

#[test]
fn digest_with_no_open_tasks_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let user = register(&conn);
    add_task(&conn, &user, "finished", "high", None, NOW);
    complete_all(&conn);

    let mailer = Arc::new(RecordingMailer::default());
    let service =
        ReminderService::new(SqliteTaskRepository::new(&conn)).with_mailer(mailer.clone());

    let err = service.send_digest(&user, NOW).unwrap_err();
    assert!(matches!(err, ReminderServiceError::NoTasks));
    assert!(err.is_client_error());
    assert!(mailer.sent.lock().unwrap().is_empty());
}

#[test]
fn mail_failure_is_a_server_error() {
    let conn = open_db_in_memory().unwrap();
    let user = register(&conn);
    add_task(&conn, &user, "taxes", "high", Some(NOW + MS_PER_HOUR), NOW);

    let service = ReminderService::new(SqliteTaskRepository::new(&conn))
        .with_mailer(Arc::new(RejectingMailer));

    let err = service.send_digest(&user, NOW).unwrap_err();
    assert!(matches!(err, ReminderServiceError::Mail(MailError::Transport(_))));
    assert!(!err.is_client_error());
}

#[test]
fn storage_failure_is_not_reported_as_empty() {
    let conn = open_db_in_memory().unwrap();
    let user = register(&conn);
    conn.execute_batch("DROP TABLE tasks;").unwrap();

    let service = ReminderService::new(SqliteTaskRepository::new(&conn));
    let err = service.list_suggestions(user.id, NOW).unwrap_err();
    assert!(matches!(err, ReminderServiceError::Repo(_)));
    assert!(!err.is_client_error());
}
