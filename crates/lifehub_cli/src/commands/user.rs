use super::UserCommand;
use crate::{print_json, resolve_user};
use lifehub_core::db::Connection;
use lifehub_core::repo::user_repo::SqliteUserRepository;
use lifehub_core::service::user_service::UserService;

pub fn run(conn: &Connection, cmd: UserCommand) -> anyhow::Result<()> {
    match cmd {
        UserCommand::Add { name, email } => {
            let user = UserService::new(SqliteUserRepository::new(conn)).register(&name, &email)?;
            print_json(&user)
        }
        UserCommand::Show { email } => print_json(&resolve_user(conn, &email)?),
    }
}
