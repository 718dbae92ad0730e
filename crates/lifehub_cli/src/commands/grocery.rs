use super::GroceryCommand;
use crate::{print_json, resolve_user};
use lifehub_core::config::CoreConfig;
use lifehub_core::db::Connection;
use lifehub_core::now_epoch_ms;
use lifehub_core::provider::OpenAiSuggestionProvider;
use lifehub_core::repo::grocery_repo::SqliteGroceryRepository;
use lifehub_core::service::grocery_service::{GroceryPatch, GroceryService};
use lifehub_core::SuggestionContext;
use std::sync::Arc;

pub fn run(conn: &Connection, config: &CoreConfig, cmd: GroceryCommand) -> anyhow::Result<()> {
    let mut service = GroceryService::new(SqliteGroceryRepository::new(conn));
    if let Some(provider_config) = config.provider.as_ref() {
        let provider = OpenAiSuggestionProvider::from_config(provider_config)?;
        service = service.with_provider(Arc::new(provider));
    }

    match cmd {
        GroceryCommand::Add { who, name, qty } => {
            let user = resolve_user(conn, &who.user)?;
            print_json(&service.add_item(user.id, &name, qty, now_epoch_ms())?)
        }
        GroceryCommand::List { who } => {
            let user = resolve_user(conn, &who.user)?;
            print_json(&service.list_items(user.id)?)
        }
        GroceryCommand::Check { who, id } => {
            let user = resolve_user(conn, &who.user)?;
            let patch = GroceryPatch {
                checked: Some(true),
                ..GroceryPatch::default()
            };
            print_json(&service.update_item(user.id, id, patch)?)
        }
        GroceryCommand::Suggest { who, context } => {
            let user = resolve_user(conn, &who.user)?;
            let context = SuggestionContext { tasks: context };
            let suggestions = service.suggest(user.id, &context)?;
            print_json(&serde_json::json!({ "suggestions": suggestions }))
        }
    }
}
