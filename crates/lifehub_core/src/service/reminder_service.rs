//! Reminder suggestions and email digest use-cases.
//!
//! # Responsibility
//! - Load a user's open tasks and rank them for display or mail.
//! - Hand the digest to the configured mailer.
//!
//! # Invariants
//! - Zero qualifying tasks yields an empty suggestion list, not an error.
//! - Persistence failures propagate unchanged; they are never reported as
//!   "no tasks".
//! - A missing mailer is reported as `MailerNotConfigured`, distinct from a
//!   failed send.

use crate::model::user::{UserId, UserProfile};
use crate::notify::digest::build_digest_message;
use crate::notify::mailer::{MailError, MailMessage, MailReceipt, Mailer};
use crate::repo::task_repo::{TaskListQuery, TaskRepository};
use crate::repo::RepoError;
use crate::scoring::reminder::{select_reminders, ScoredTask, SelectionPolicy};
use log::{error, info};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

#[derive(Debug)]
pub enum ReminderServiceError {
    /// Email features are disabled in this deployment.
    MailerNotConfigured,
    /// The user has no open tasks to put in a digest.
    NoTasks,
    Repo(RepoError),
    Mail(MailError),
}

impl ReminderServiceError {
    /// Whether the failure was caused by the request rather than the server.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::MailerNotConfigured | Self::NoTasks)
    }
}

impl Display for ReminderServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MailerNotConfigured => write!(f, "mailer not configured"),
            Self::NoTasks => write!(f, "no tasks to send"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::Mail(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ReminderServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::Mail(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ReminderServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<MailError> for ReminderServiceError {
    fn from(value: MailError) -> Self {
        Self::Mail(value)
    }
}

/// Outcome of a delivered digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DigestReport {
    pub sent_to: String,
    pub task_count: usize,
    pub receipt: MailReceipt,
}

pub struct ReminderService<R: TaskRepository> {
    repo: R,
    mailer: Option<Arc<dyn Mailer>>,
}

impl<R: TaskRepository> ReminderService<R> {
    /// Creates a service without mail delivery.
    pub fn new(repo: R) -> Self {
        Self { repo, mailer: None }
    }

    pub fn with_mailer(mut self, mailer: Arc<dyn Mailer>) -> Self {
        self.mailer = Some(mailer);
        self
    }

    /// Ranked open tasks scoring at least 40, at most 10.
    pub fn list_suggestions(
        &self,
        user_id: UserId,
        now_ms: i64,
    ) -> Result<Vec<ScoredTask>, ReminderServiceError> {
        let tasks = self.repo.list_tasks(&TaskListQuery::open(user_id))?;
        let selection = select_reminders(&tasks, now_ms, SelectionPolicy::SUGGESTIONS);
        info!(
            "event=reminder_list module=service status=ok candidates={} selected={}",
            tasks.len(),
            selection.len()
        );
        Ok(selection)
    }

    /// Builds the digest mail for `user` without sending it.
    pub fn preview_digest(
        &self,
        user: &UserProfile,
        now_ms: i64,
    ) -> Result<MailMessage, ReminderServiceError> {
        let selection = self.digest_selection(user, now_ms)?;
        Ok(build_digest_message(user, &selection))
    }

    fn digest_selection(
        &self,
        user: &UserProfile,
        now_ms: i64,
    ) -> Result<Vec<ScoredTask>, ReminderServiceError> {
        let tasks = self.repo.list_tasks(&TaskListQuery::open(user.id))?;
        if tasks.is_empty() {
            return Err(ReminderServiceError::NoTasks);
        }
        Ok(select_reminders(&tasks, now_ms, SelectionPolicy::DIGEST))
    }

    /// Sends the top five open tasks to `user` by mail.
    pub fn send_digest(
        &self,
        user: &UserProfile,
        now_ms: i64,
    ) -> Result<DigestReport, ReminderServiceError> {
        let Some(mailer) = self.mailer.as_ref() else {
            info!("event=reminder_digest module=service status=disabled reason=mailer_not_configured");
            return Err(ReminderServiceError::MailerNotConfigured);
        };

        let selection = self.digest_selection(user, now_ms)?;
        let task_count = selection.len();
        let message = build_digest_message(user, &selection);

        let receipt = match mailer.send(&message) {
            Ok(receipt) => receipt,
            Err(err) => {
                error!(
                    "event=reminder_digest module=service status=error task_count={} error={}",
                    task_count, err
                );
                return Err(err.into());
            }
        };

        info!(
            "event=reminder_digest module=service status=ok task_count={}",
            task_count
        );
        Ok(DigestReport {
            sent_to: message.to,
            task_count,
            receipt,
        })
    }
}
