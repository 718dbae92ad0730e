//! Ranking logic: task urgency, reminder selection and grocery suggestions.
//!
//! # Responsibility
//! - Turn in-memory snapshots into ranked, bounded lists.
//!
//! # Invariants
//! - Every function here is pure: no I/O, no shared mutable state.
//! - Results depend only on the inputs and the caller-provided `now`.

pub mod grocery;
pub mod reminder;
pub mod urgency;
