//! Calendar event repository contracts and SQLite implementation.
//!
//! # Invariants
//! - Write paths call `CalendarEvent::validate()` before SQL mutations.
//! - Events are listed by `start_at ASC`.

use crate::model::event::{CalendarEvent, EventId};
use crate::model::user::UserId;
use crate::repo::{parse_uuid, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const EVENT_SELECT_SQL: &str = "SELECT
    id,
    user_id,
    title,
    start_at,
    end_at,
    description
FROM calendar_events";

pub trait EventRepository {
    fn create_event(&self, event: &CalendarEvent) -> RepoResult<EventId>;
    fn update_event(&self, event: &CalendarEvent) -> RepoResult<()>;
    fn get_event(&self, user_id: UserId, id: EventId) -> RepoResult<Option<CalendarEvent>>;
    fn list_events(&self, user_id: UserId) -> RepoResult<Vec<CalendarEvent>>;
    fn delete_event(&self, user_id: UserId, id: EventId) -> RepoResult<()>;
}

/// SQLite-backed calendar event repository.
pub struct SqliteEventRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEventRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl EventRepository for SqliteEventRepository<'_> {
    fn create_event(&self, event: &CalendarEvent) -> RepoResult<EventId> {
        event.validate()?;

        self.conn.execute(
            "INSERT INTO calendar_events (id, user_id, title, start_at, end_at, description)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                event.id.to_string(),
                event.user_id.to_string(),
                event.title.as_str(),
                event.start_at,
                event.end_at,
                event.description.as_str(),
            ],
        )?;

        Ok(event.id)
    }

    fn update_event(&self, event: &CalendarEvent) -> RepoResult<()> {
        event.validate()?;

        let changed = self.conn.execute(
            "UPDATE calendar_events
             SET title = ?1, start_at = ?2, end_at = ?3, description = ?4
             WHERE id = ?5
               AND user_id = ?6;",
            params![
                event.title.as_str(),
                event.start_at,
                event.end_at,
                event.description.as_str(),
                event.id.to_string(),
                event.user_id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(event.id));
        }

        Ok(())
    }

    fn get_event(&self, user_id: UserId, id: EventId) -> RepoResult<Option<CalendarEvent>> {
        let mut stmt = self.conn.prepare(&format!(
            "{EVENT_SELECT_SQL} WHERE id = ?1 AND user_id = ?2;"
        ))?;

        let mut rows = stmt.query(params![id.to_string(), user_id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_event_row(row)?));
        }

        Ok(None)
    }

    fn list_events(&self, user_id: UserId) -> RepoResult<Vec<CalendarEvent>> {
        let mut stmt = self.conn.prepare(&format!(
            "{EVENT_SELECT_SQL} WHERE user_id = ?1 ORDER BY start_at ASC, id ASC;"
        ))?;

        let mut rows = stmt.query([user_id.to_string()])?;
        let mut events = Vec::new();
        while let Some(row) = rows.next()? {
            events.push(parse_event_row(row)?);
        }

        Ok(events)
    }

    fn delete_event(&self, user_id: UserId, id: EventId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM calendar_events WHERE id = ?1 AND user_id = ?2;",
            params![id.to_string(), user_id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

fn parse_event_row(row: &Row<'_>) -> RepoResult<CalendarEvent> {
    let id_text: String = row.get("id")?;
    let user_text: String = row.get("user_id")?;

    let event = CalendarEvent {
        id: parse_uuid(&id_text, "calendar_events.id")?,
        user_id: parse_uuid(&user_text, "calendar_events.user_id")?,
        title: row.get("title")?,
        start_at: row.get("start_at")?,
        end_at: row.get("end_at")?,
        description: row.get("description")?,
    };
    event.validate()?;
    Ok(event)
}
