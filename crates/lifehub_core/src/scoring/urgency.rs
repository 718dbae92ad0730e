//! Task urgency scoring.
//!
//! A score is the sum of four components, rounded to the nearest integer:
//!
//! | component | rule |
//! |---|---|
//! | priority | high +30, medium +15, low +0 |
//! | due date | overdue +70, within 24h +50, within 72h +30, later `30 * e^(-0.25 * days)` |
//! | recency | `max(0, 10 - age_days)` |
//! | effort | `<= 15 min` +6, `<= 60 min` +3 |
//!
//! Completed tasks always score [`COMPLETED_SENTINEL`].

use crate::model::task::{Task, TaskPriority};
use crate::model::{MS_PER_DAY, MS_PER_HOUR};
use serde::Serialize;

/// Score returned for completed tasks. Sorts last and fails any positive threshold.
pub const COMPLETED_SENTINEL: i64 = -100;

const HIGH_PRIORITY_WEIGHT: f64 = 30.0;
const MEDIUM_PRIORITY_WEIGHT: f64 = 15.0;
const LOW_PRIORITY_WEIGHT: f64 = 0.0;

const OVERDUE_BONUS: f64 = 70.0;
const DUE_WITHIN_DAY_BONUS: f64 = 50.0;
const DUE_WITHIN_THREE_DAYS_BONUS: f64 = 30.0;
const FAR_DUE_SCALE: f64 = 30.0;
const FAR_DUE_DECAY_PER_DAY: f64 = 0.25;

const RECENCY_WINDOW_DAYS: f64 = 10.0;

const QUICK_TASK_MINUTES: u32 = 15;
const QUICK_TASK_BOOST: f64 = 6.0;
const SHORT_TASK_MINUTES: u32 = 60;
const SHORT_TASK_BOOST: f64 = 3.0;

/// Per-component contribution to a task's score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub priority: f64,
    pub due: f64,
    pub recency: f64,
    pub effort: f64,
}

impl ScoreBreakdown {
    /// Computes every component for `task` at `now_ms`, ignoring completion.
    pub fn for_task(task: &Task, now_ms: i64) -> Self {
        Self {
            priority: priority_weight(task.priority),
            due: due_urgency(task.due_at, now_ms),
            recency: recency_boost(task.created_at, now_ms),
            effort: effort_boost(task.estimated_minutes),
        }
    }

    /// Unrounded sum of all components.
    pub fn total(&self) -> f64 {
        self.priority + self.due + self.recency + self.effort
    }
}

/// Scores one task at `now_ms`. Never fails.
pub fn score_task(task: &Task, now_ms: i64) -> i64 {
    if task.completed {
        return COMPLETED_SENTINEL;
    }

    ScoreBreakdown::for_task(task, now_ms).total().round() as i64
}

pub fn priority_weight(priority: TaskPriority) -> f64 {
    match priority {
        TaskPriority::High => HIGH_PRIORITY_WEIGHT,
        TaskPriority::Medium => MEDIUM_PRIORITY_WEIGHT,
        TaskPriority::Low => LOW_PRIORITY_WEIGHT,
    }
}

/// Deadline pressure. Tasks without a due date contribute nothing.
pub fn due_urgency(due_at: Option<i64>, now_ms: i64) -> f64 {
    let Some(due_at) = due_at else {
        return 0.0;
    };

    let until_due_ms = due_at.saturating_sub(now_ms);
    if until_due_ms < 0 {
        OVERDUE_BONUS
    } else if until_due_ms <= 24 * MS_PER_HOUR {
        DUE_WITHIN_DAY_BONUS
    } else if until_due_ms <= 72 * MS_PER_HOUR {
        DUE_WITHIN_THREE_DAYS_BONUS
    } else {
        let days_until_due = until_due_ms as f64 / MS_PER_DAY as f64;
        (FAR_DUE_SCALE * (-FAR_DUE_DECAY_PER_DAY * days_until_due).exp()).max(0.0)
    }
}

/// Boost for freshly created tasks, fading linearly to zero over ten days.
///
/// A creation time in the future counts as age zero.
pub fn recency_boost(created_at: i64, now_ms: i64) -> f64 {
    let age_days = (now_ms.saturating_sub(created_at) as f64 / MS_PER_DAY as f64).max(0.0);
    (RECENCY_WINDOW_DAYS - age_days).max(0.0)
}

/// Quick-win boost for tasks with a short effort estimate.
pub fn effort_boost(estimated_minutes: Option<u32>) -> f64 {
    match estimated_minutes {
        Some(minutes) if minutes <= QUICK_TASK_MINUTES => QUICK_TASK_BOOST,
        Some(minutes) if minutes <= SHORT_TASK_MINUTES => SHORT_TASK_BOOST,
        _ => 0.0,
    }
}
