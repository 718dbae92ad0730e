use super::EventCommand;
use crate::time_arg::parse_timestamp;
use crate::{print_json, resolve_user};
use lifehub_core::db::Connection;
use lifehub_core::repo::event_repo::SqliteEventRepository;
use lifehub_core::service::event_service::{EventService, NewEvent};

pub fn run(conn: &Connection, cmd: EventCommand) -> anyhow::Result<()> {
    let service = EventService::new(SqliteEventRepository::new(conn));

    match cmd {
        EventCommand::Add {
            who,
            title,
            start,
            end,
            description,
        } => {
            let user = resolve_user(conn, &who.user)?;
            let input = NewEvent {
                title,
                start_at: parse_timestamp(&start)?,
                end_at: parse_timestamp(&end)?,
                description,
            };
            print_json(&service.create_event(user.id, input)?)
        }
        EventCommand::List { who } => {
            let user = resolve_user(conn, &who.user)?;
            print_json(&service.list_events(user.id)?)
        }
        EventCommand::Delete { who, id } => {
            let user = resolve_user(conn, &who.user)?;
            service.delete_event(user.id, id)?;
            println!("deleted {id}");
            Ok(())
        }
    }
}
