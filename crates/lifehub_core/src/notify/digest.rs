//! Email digest formatting for the top reminder selection.

use crate::model::user::UserProfile;
use crate::notify::mailer::MailMessage;
use crate::scoring::reminder::ScoredTask;
use chrono::DateTime;

pub const DIGEST_SUBJECT: &str = "Your Smart Reminders";

/// Renders one line per task: `"{rank}. {title}{due clause}"`, joined by `\n`.
pub fn format_digest_lines(selection: &[ScoredTask]) -> String {
    selection
        .iter()
        .enumerate()
        .map(|(index, scored)| {
            let due_clause = scored
                .task
                .due_at
                .map(|due_at| format!(" (due {})", format_due(due_at)))
                .unwrap_or_default();
            format!("{}. {}{}", index + 1, scored.task.title.trim(), due_clause)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Formats an epoch-millisecond deadline as `YYYY-MM-DD HH:MM UTC`.
pub fn format_due(due_at: i64) -> String {
    DateTime::from_timestamp_millis(due_at)
        .map(|at| at.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| due_at.to_string())
}

/// Builds the digest mail addressed to `user`.
pub fn build_digest_message(user: &UserProfile, selection: &[ScoredTask]) -> MailMessage {
    MailMessage {
        to: user.email.clone(),
        subject: DIGEST_SUBJECT.to_string(),
        text: format!(
            "Hello {},\n\nHere are your top tasks:\n\n{}\n\n- LifeHub",
            user.name,
            format_digest_lines(selection)
        ),
    }
}
