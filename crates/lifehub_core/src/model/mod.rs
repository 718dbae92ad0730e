//! Domain model for tasks, calendar events, groceries and user profiles.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Own per-record validation rules enforced by repositories.
//!
//! # Invariants
//! - Every record is identified by a stable, non-nil UUID.
//! - Every record except `UserProfile` is owned by exactly one user.
//! - Timestamps are Unix epoch milliseconds.

pub mod event;
pub mod grocery;
pub mod task;
pub mod user;

/// Milliseconds in one hour.
pub const MS_PER_HOUR: i64 = 60 * 60 * 1000;
/// Milliseconds in one day.
pub const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

/// Returns the current wall-clock time in epoch milliseconds.
pub fn now_epoch_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
