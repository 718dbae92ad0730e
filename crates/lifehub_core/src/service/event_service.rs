//! Calendar event use-case service.

use crate::model::event::{CalendarEvent, EventId};
use crate::model::user::UserId;
use crate::repo::event_repo::EventRepository;
use crate::service::ServiceError;

/// Input for scheduling an event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewEvent {
    pub title: String,
    pub start_at: i64,
    pub end_at: i64,
    pub description: Option<String>,
}

/// Partial update; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventPatch {
    pub title: Option<String>,
    pub start_at: Option<i64>,
    pub end_at: Option<i64>,
    pub description: Option<String>,
}

pub struct EventService<R: EventRepository> {
    repo: R,
}

impl<R: EventRepository> EventService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates an event. Rejects windows where `end_at < start_at`.
    pub fn create_event(
        &self,
        user_id: UserId,
        input: NewEvent,
    ) -> Result<CalendarEvent, ServiceError> {
        let mut event = CalendarEvent::new(user_id, input.title.trim(), input.start_at, input.end_at);
        event.description = input.description.unwrap_or_default();

        self.repo.create_event(&event)?;
        Ok(event)
    }

    pub fn update_event(
        &self,
        user_id: UserId,
        event_id: EventId,
        patch: EventPatch,
    ) -> Result<CalendarEvent, ServiceError> {
        let mut event = self
            .repo
            .get_event(user_id, event_id)?
            .ok_or(ServiceError::NotFound(event_id))?;

        if let Some(title) = patch.title {
            event.title = title.trim().to_string();
        }
        if let Some(start_at) = patch.start_at {
            event.start_at = start_at;
        }
        if let Some(end_at) = patch.end_at {
            event.end_at = end_at;
        }
        if let Some(description) = patch.description {
            event.description = description;
        }

        self.repo.update_event(&event)?;
        Ok(event)
    }

    /// Lists events of `user_id` by start time.
    pub fn list_events(&self, user_id: UserId) -> Result<Vec<CalendarEvent>, ServiceError> {
        Ok(self.repo.list_events(user_id)?)
    }

    pub fn delete_event(&self, user_id: UserId, event_id: EventId) -> Result<(), ServiceError> {
        Ok(self.repo.delete_event(user_id, event_id)?)
    }
}
