//! Core domain logic for LifeHub.
//! Scoring, selection, and suggestion rules live here; front-ends only wire
//! configuration, storage, and transport around them.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod notify;
pub mod provider;
pub mod repo;
pub mod scoring;
pub mod service;

pub use config::{ConfigError, CoreConfig, MailerConfig, ProviderConfig};
pub use db::{open_db, open_db_in_memory, DbError};
pub use logging::{default_log_level, init_from_config, init_logging, logging_status};
pub use model::event::{CalendarEvent, EventId};
pub use model::grocery::{GroceryItem, GroceryItemId};
pub use model::task::{Task, TaskId, TaskPriority};
pub use model::user::{UserId, UserProfile};
pub use model::now_epoch_ms;
pub use notify::mailer::{MailError, MailMessage, MailReceipt, Mailer, SmtpMailer};
pub use provider::{OpenAiSuggestionProvider, ProviderError, SuggestionProvider};
pub use repo::{RepoError, ValidationError};
pub use scoring::grocery::{suggest_from_history, SuggestionContext};
pub use scoring::reminder::{select_reminders, ScoredTask, SelectionPolicy};
pub use scoring::urgency::score_task;
pub use service::reminder_service::{DigestReport, ReminderService, ReminderServiceError};
pub use service::ServiceError;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
