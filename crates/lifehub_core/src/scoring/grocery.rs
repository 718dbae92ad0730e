//! Grocery suggestion ranking and provider response parsing.
//!
//! # Responsibility
//! - Rank a user's grocery history by frequency, then recency.
//! - Merge ranked history with a fixed fallback list.
//! - Build provider prompts and parse free-text provider replies.
//!
//! # Invariants
//! - Suggestion lists never contain case-insensitive duplicates.
//! - Suggestion lists never exceed the requested limit.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Items offered when history is short or empty, in display order.
pub const DEFAULT_GROCERY_FALLBACK: [&str; 5] = ["Milk", "Eggs", "Bread", "Coffee", "Bananas"];
/// Maximum suggestions returned to callers.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 6;

const SPLIT_RESPONSE_LIMIT: usize = 6;

static JSON_ARRAY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\[.*\]").expect("valid json array regex"));
static LIST_SEPARATOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\n,]+").expect("valid list separator regex"));

/// Optional hints sent to the provider alongside history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionContext {
    /// Titles of tasks the caller considers relevant (e.g. "host dinner").
    #[serde(default)]
    pub tasks: Vec<String>,
}

/// Outcome of parsing a provider reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderParse {
    /// At least one usable name was found.
    Parsed(Vec<String>),
    /// Nothing usable; callers fall back to the heuristic.
    Unparseable,
}

/// Ranks history and fills up from `fallback` until `limit` names are collected.
///
/// Entries are trimmed and lowercased for counting; blanks are ignored. Equal
/// counts are ordered by most recent occurrence. Ranked names are displayed
/// with the first letter capitalized.
pub fn suggest_from_history<H, F>(history: &[H], fallback: &[F], limit: usize) -> Vec<String>
where
    H: AsRef<str>,
    F: AsRef<str>,
{
    let mut output = Vec::with_capacity(limit);

    for key in rank_history(history) {
        if output.len() >= limit {
            break;
        }
        push_unique(&mut output, capitalize_first(&key));
    }

    for name in fallback {
        if output.len() >= limit {
            break;
        }
        let name = name.as_ref().trim();
        if !name.is_empty() {
            push_unique(&mut output, name.to_string());
        }
    }

    output
}

/// Normalized history keys, most frequent first, ties broken by recency.
pub fn rank_history<H: AsRef<str>>(history: &[H]) -> Vec<String> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    // Newest first, so first-seen order doubles as the recency tie-break.
    for entry in history.iter().rev() {
        let key = entry.as_ref().trim().to_lowercase();
        if key.is_empty() {
            continue;
        }
        match positions.get(&key) {
            Some(&index) => counts[index].1 += 1,
            None => {
                positions.insert(key.clone(), counts.len());
                counts.push((key, 1));
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.into_iter().map(|(key, _)| key).collect()
}

/// Uppercases the first character and keeps the rest unchanged.
pub fn capitalize_first(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Trims, drops blanks and case-insensitive duplicates, and truncates to `limit`.
pub fn dedupe_suggestions(names: Vec<String>, limit: usize) -> Vec<String> {
    let mut output = Vec::with_capacity(limit.min(names.len()));
    for name in names {
        if output.len() >= limit {
            break;
        }
        let trimmed = name.trim();
        if !trimmed.is_empty() {
            push_unique(&mut output, trimmed.to_string());
        }
    }
    output
}

/// Builds the provider prompt from history and context.
pub fn build_suggestion_prompt(history: &[String], context: &SuggestionContext) -> String {
    let history_json = serde_json::to_string(history).unwrap_or_else(|_| "[]".to_string());
    let context_json = serde_json::to_string(context).unwrap_or_else(|_| "{}".to_string());
    format!(
        "You are a helpful grocery assistant. Based on user history {history_json} and \
         context {context_json}, suggest {DEFAULT_SUGGESTION_LIMIT} common grocery items \
         as a JSON array of strings."
    )
}

/// Extracts item names from a free-text provider reply.
///
/// The first bracketed span is read as a JSON array; if it does not parse the
/// reply is unparseable. Without a bracketed span, the text is split on
/// newlines and commas and the first six entries are kept.
pub fn parse_suggestion_response(text: &str) -> ProviderParse {
    if let Some(span) = JSON_ARRAY_RE.find(text) {
        return match serde_json::from_str::<Vec<serde_json::Value>>(span.as_str()) {
            Ok(values) => non_empty(
                values
                    .into_iter()
                    .map(json_value_to_name)
                    .filter(|name| !name.is_empty())
                    .collect(),
            ),
            Err(_) => ProviderParse::Unparseable,
        };
    }

    non_empty(
        LIST_SEPARATOR_RE
            .split(text)
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .take(SPLIT_RESPONSE_LIMIT)
            .map(str::to_string)
            .collect(),
    )
}

fn json_value_to_name(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(text) => text.trim().to_string(),
        other => other.to_string(),
    }
}

fn non_empty(names: Vec<String>) -> ProviderParse {
    if names.is_empty() {
        ProviderParse::Unparseable
    } else {
        ProviderParse::Parsed(names)
    }
}

fn push_unique(output: &mut Vec<String>, candidate: String) {
    let folded = candidate.to_lowercase();
    if !output.iter().any(|existing| existing.to_lowercase() == folded) {
        output.push(candidate);
    }
}
