use super::ReminderCommand;
use crate::{print_json, resolve_user};
use lifehub_core::config::CoreConfig;
use lifehub_core::db::Connection;
use lifehub_core::now_epoch_ms;
use lifehub_core::repo::task_repo::SqliteTaskRepository;
use lifehub_core::{ReminderService, SmtpMailer};
use std::sync::Arc;

pub fn run(conn: &Connection, config: &CoreConfig, cmd: ReminderCommand) -> anyhow::Result<()> {
    let service = ReminderService::new(SqliteTaskRepository::new(conn));

    match cmd {
        ReminderCommand::List { who } => {
            let user = resolve_user(conn, &who.user)?;
            print_json(&service.list_suggestions(user.id, now_epoch_ms())?)
        }
        ReminderCommand::Send { who, dry_run: true } => {
            let user = resolve_user(conn, &who.user)?;
            let message = service.preview_digest(&user, now_epoch_ms())?;
            println!("To: {}\nSubject: {}\n\n{}", message.to, message.subject, message.text);
            Ok(())
        }
        ReminderCommand::Send { who, dry_run: false } => {
            let user = resolve_user(conn, &who.user)?;
            // Mail settings are only read when a digest actually goes out.
            let service = match config.mailer.as_ref() {
                Some(mailer_config) => {
                    service.with_mailer(Arc::new(SmtpMailer::from_config(mailer_config)?))
                }
                None => service,
            };
            print_json(&service.send_digest(&user, now_epoch_ms())?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::run;
    use crate::commands::{ReminderCommand, UserArg};
    use lifehub_core::config::{CoreConfig, MailerConfig};
    use lifehub_core::db::Connection;
    use lifehub_core::repo::task_repo::SqliteTaskRepository;
    use lifehub_core::repo::user_repo::SqliteUserRepository;
    use lifehub_core::service::task_service::{NewTask, TaskService};
    use lifehub_core::service::user_service::UserService;
    use lifehub_core::{now_epoch_ms, open_db_in_memory, MailError, ReminderServiceError};

    const EMAIL: &str = "ada@example.com";

    fn seeded_db() -> Connection {
        let conn = open_db_in_memory().unwrap();
        let user = UserService::new(SqliteUserRepository::new(&conn))
            .register("Ada", EMAIL)
            .unwrap();
        TaskService::new(SqliteTaskRepository::new(&conn))
            .create_task(
                user.id,
                NewTask {
                    title: "File taxes".to_string(),
                    priority: Some("high".to_string()),
                    due_at: Some(now_epoch_ms()),
                    ..NewTask::default()
                },
                now_epoch_ms(),
            )
            .unwrap();
        conn
    }

    fn config_with_sender(user: Option<&str>) -> CoreConfig {
        let mut config = CoreConfig::from_lookup(|_| None).unwrap();
        config.mailer = user.map(|user| MailerConfig {
            host: "smtp.example.com".to_string(),
            port: 587,
            user: user.to_string(),
            password: "secret".to_string(),
        });
        config
    }

    fn who() -> UserArg {
        UserArg {
            user: EMAIL.to_string(),
        }
    }

    #[test]
    fn listing_ignores_unusable_mail_settings() {
        let conn = seeded_db();
        let config = config_with_sender(Some("apikey"));

        run(&conn, &config, ReminderCommand::List { who: who() }).unwrap();
    }

    #[test]
    fn dry_run_ignores_unusable_mail_settings() {
        let conn = seeded_db();
        let config = config_with_sender(Some("apikey"));

        run(
            &conn,
            &config,
            ReminderCommand::Send {
                who: who(),
                dry_run: true,
            },
        )
        .unwrap();
    }

    #[test]
    fn sending_reports_unusable_sender_address() {
        let conn = seeded_db();
        let config = config_with_sender(Some("apikey"));

        let err = run(
            &conn,
            &config,
            ReminderCommand::Send {
                who: who(),
                dry_run: false,
            },
        )
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<MailError>(),
            Some(MailError::InvalidAddress(_))
        ));
    }

    #[test]
    fn sending_without_mail_settings_is_not_configured() {
        let conn = seeded_db();
        let config = config_with_sender(None);

        let err = run(
            &conn,
            &config,
            ReminderCommand::Send {
                who: who(),
                dry_run: false,
            },
        )
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ReminderServiceError>(),
            Some(ReminderServiceError::MailerNotConfigured)
        ));
    }
}
