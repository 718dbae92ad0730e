//! Reminder selection over a user's task snapshot.
//!
//! # Invariants
//! - Completed tasks never appear in a selection, even if the caller passes them.
//! - Output is sorted by score descending, then earliest due date (tasks
//!   without one last), then earliest creation, then input order.
//! - Output length never exceeds the policy limit.

use crate::model::task::Task;
use crate::scoring::urgency::score_task;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Minimum score for a task to appear in the suggestions view.
pub const DEFAULT_MIN_SCORE: i64 = 40;
/// Maximum tasks in the suggestions view.
pub const SUGGESTIONS_LIMIT: usize = 10;
/// Maximum tasks in an email digest.
pub const DIGEST_LIMIT: usize = 5;

/// A task paired with its score at selection time. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredTask {
    #[serde(flatten)]
    pub task: Task,
    pub score: i64,
}

/// Threshold and size bound applied after ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionPolicy {
    /// Tasks scoring below this are dropped. `None` keeps every open task.
    pub min_score: Option<i64>,
    pub limit: usize,
}

impl SelectionPolicy {
    /// In-app reminder suggestions.
    pub const SUGGESTIONS: Self = Self {
        min_score: Some(DEFAULT_MIN_SCORE),
        limit: SUGGESTIONS_LIMIT,
    };

    /// Email digest: top tasks regardless of threshold.
    pub const DIGEST: Self = Self {
        min_score: None,
        limit: DIGEST_LIMIT,
    };

    fn admits(&self, score: i64) -> bool {
        self.min_score.map_or(true, |min| score >= min)
    }
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self::SUGGESTIONS
    }
}

/// Scores and orders every open task. No threshold, no truncation.
pub fn rank_tasks(tasks: &[Task], now_ms: i64) -> Vec<ScoredTask> {
    let mut scored = tasks
        .iter()
        .filter(|task| task.is_open())
        .map(|task| ScoredTask {
            score: score_task(task, now_ms),
            task: task.clone(),
        })
        .collect::<Vec<_>>();

    // `sort_by` is stable, so input order settles remaining ties.
    scored.sort_by(compare_ranked);
    scored
}

/// Ranks `tasks` and applies `policy`. Returns an empty list when nothing qualifies.
pub fn select_reminders(tasks: &[Task], now_ms: i64, policy: SelectionPolicy) -> Vec<ScoredTask> {
    rank_tasks(tasks, now_ms)
        .into_iter()
        .filter(|scored| policy.admits(scored.score))
        .take(policy.limit)
        .collect()
}

fn compare_ranked(a: &ScoredTask, b: &ScoredTask) -> Ordering {
    b.score
        .cmp(&a.score)
        .then_with(|| compare_due(a.task.due_at, b.task.due_at))
        .then_with(|| a.task.created_at.cmp(&b.task.created_at))
}

fn compare_due(a: Option<i64>, b: Option<i64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
