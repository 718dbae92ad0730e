//! Grocery list and suggestion use-case service.
//!
//! # Responsibility
//! - CRUD over the user's shopping list, recording history on every add.
//! - Produce suggestion lists from a provider, degrading to the heuristic.
//!
//! # Invariants
//! - Provider failures and unusable replies never fail `suggest`.
//! - Repository failures still propagate from `suggest`.
//! - Suggestion output holds at most `limit` case-insensitively distinct names.

use crate::model::grocery::{GroceryItem, GroceryItemId};
use crate::model::user::UserId;
use crate::provider::SuggestionProvider;
use crate::repo::grocery_repo::GroceryRepository;
use crate::scoring::grocery::{
    build_suggestion_prompt, dedupe_suggestions, parse_suggestion_response, suggest_from_history,
    ProviderParse, SuggestionContext, DEFAULT_GROCERY_FALLBACK, DEFAULT_SUGGESTION_LIMIT,
};
use crate::service::ServiceError;
use log::{info, warn};
use std::sync::Arc;
use std::time::Instant;

/// Partial update; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroceryPatch {
    pub name: Option<String>,
    pub qty: Option<u32>,
    pub checked: Option<bool>,
}

pub struct GroceryService<R: GroceryRepository> {
    repo: R,
    provider: Option<Arc<dyn SuggestionProvider>>,
    fallback: Vec<String>,
    limit: usize,
}

impl<R: GroceryRepository> GroceryService<R> {
    /// Creates a heuristic-only service with the default fallback list.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            provider: None,
            fallback: DEFAULT_GROCERY_FALLBACK
                .iter()
                .map(|name| name.to_string())
                .collect(),
            limit: DEFAULT_SUGGESTION_LIMIT,
        }
    }

    /// Consults `provider` before the heuristic.
    pub fn with_provider(mut self, provider: Arc<dyn SuggestionProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Replaces the fallback list used to fill short suggestion lists.
    pub fn with_fallback(mut self, fallback: Vec<String>) -> Self {
        self.fallback = fallback;
        self
    }

    /// Adds one item (quantity defaults to 1) and appends its name to history.
    pub fn add_item(
        &self,
        user_id: UserId,
        name: &str,
        qty: Option<u32>,
        now_ms: i64,
    ) -> Result<GroceryItem, ServiceError> {
        let mut item = GroceryItem::new(user_id, name, now_ms);
        if let Some(qty) = qty {
            item.qty = qty;
        }
        item.validate()?;

        self.repo.create_item(&item)?;
        Ok(item)
    }

    pub fn update_item(
        &self,
        user_id: UserId,
        item_id: GroceryItemId,
        patch: GroceryPatch,
    ) -> Result<GroceryItem, ServiceError> {
        let mut item = self
            .repo
            .get_item(user_id, item_id)?
            .ok_or(ServiceError::NotFound(item_id))?;

        if let Some(name) = patch.name {
            item.name = name.trim().to_string();
        }
        if let Some(qty) = patch.qty {
            item.qty = qty;
        }
        if let Some(checked) = patch.checked {
            item.checked = checked;
        }

        self.repo.update_item(&item)?;
        Ok(item)
    }

    /// Lists the user's items, newest first.
    pub fn list_items(&self, user_id: UserId) -> Result<Vec<GroceryItem>, ServiceError> {
        Ok(self.repo.list_items(user_id)?)
    }

    pub fn delete_item(&self, user_id: UserId, item_id: GroceryItemId) -> Result<(), ServiceError> {
        Ok(self.repo.delete_item(user_id, item_id)?)
    }

    /// Loads history for `user_id` and returns a suggestion list.
    pub fn suggest(
        &self,
        user_id: UserId,
        context: &SuggestionContext,
    ) -> Result<Vec<String>, ServiceError> {
        let history = self.repo.list_history(user_id)?;
        Ok(self.suggest_for_history(&history, context))
    }

    /// Suggestion pipeline over an already loaded history. Never fails.
    pub fn suggest_for_history(&self, history: &[String], context: &SuggestionContext) -> Vec<String> {
        if let Some(names) = self.ask_provider(history, context) {
            return names;
        }

        let suggestions = suggest_from_history(history, &self.fallback, self.limit);
        info!(
            "event=grocery_suggest module=service status=ok source=heuristic count={}",
            suggestions.len()
        );
        suggestions
    }

    fn ask_provider(&self, history: &[String], context: &SuggestionContext) -> Option<Vec<String>> {
        let provider = self.provider.as_ref()?;
        let started_at = Instant::now();
        let prompt = build_suggestion_prompt(history, context);

        let reply = match provider.complete(&prompt) {
            Ok(reply) => reply,
            Err(err) => {
                warn!(
                    "event=grocery_suggest module=service status=fallback provider={} duration_ms={} error_code={} error={}",
                    provider.provider_id(),
                    started_at.elapsed().as_millis(),
                    err.code(),
                    err
                );
                return None;
            }
        };

        match parse_suggestion_response(&reply) {
            ProviderParse::Parsed(names) => {
                let names = dedupe_suggestions(names, self.limit);
                info!(
                    "event=grocery_suggest module=service status=ok source={} duration_ms={} count={}",
                    provider.provider_id(),
                    started_at.elapsed().as_millis(),
                    names.len()
                );
                Some(names)
            }
            ProviderParse::Unparseable => {
                warn!(
                    "event=grocery_suggest module=service status=fallback provider={} duration_ms={} error_code=provider_unparseable",
                    provider.provider_id(),
                    started_at.elapsed().as_millis()
                );
                None
            }
        }
    }
}
