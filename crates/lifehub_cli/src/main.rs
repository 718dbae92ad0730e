//! `lifehub` command-line entry point.
//!
//! Wires environment config, logging and SQLite into the core services.

mod commands;
mod time_arg;

use anyhow::Context;
use commands::{event, grocery, reminders, task, user, CommandLine, Commands};
use lifehub_core::config::CoreConfig;
use lifehub_core::repo::user_repo::SqliteUserRepository;
use lifehub_core::service::user_service::UserService;
use lifehub_core::UserProfile;
use lifehub_core::db::Connection;

fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    let mut config = CoreConfig::from_env().context("invalid environment configuration")?;
    if let Some(db) = commands.db {
        config.db_path = db.into();
    }
    lifehub_core::init_from_config(&config).context("failed to start logging")?;
    log::info!(
        "event=cli_start module=cli status=ok version={}",
        lifehub_core::core_version()
    );

    let conn = lifehub_core::open_db(&config.db_path)
        .with_context(|| format!("failed to open `{}`", config.db_path.display()))?;

    match commands.command {
        Commands::User(cmd) => user::run(&conn, cmd),
        Commands::Task(cmd) => task::run(&conn, cmd),
        Commands::Event(cmd) => event::run(&conn, cmd),
        Commands::Grocery(cmd) => grocery::run(&conn, &config, cmd),
        Commands::Reminders(cmd) => reminders::run(&conn, &config, cmd),
    }
}

/// Resolves the acting user from a `--user` mail address.
pub(crate) fn resolve_user(conn: &Connection, email: &str) -> anyhow::Result<UserProfile> {
    UserService::new(SqliteUserRepository::new(conn))
        .find_by_email(email)?
        .with_context(|| format!("no user registered with email `{email}`"))
}

pub(crate) fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
