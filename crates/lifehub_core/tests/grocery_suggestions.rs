use lifehub_core::provider::{ProviderError, SuggestionProvider};
use lifehub_core::repo::grocery_repo::{GroceryRepository, SqliteGroceryRepository};
use lifehub_core::repo::user_repo::SqliteUserRepository;
use lifehub_core::service::grocery_service::{GroceryPatch, GroceryService};
use lifehub_core::service::user_service::UserService;
use lifehub_core::{open_db_in_memory, ServiceError, SuggestionContext, UserProfile};
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

const NOW: i64 = 1_700_000_000_000;

struct ScriptedProvider {
    reply: Result<String, ProviderError>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    fn new(reply: Result<String, ProviderError>) -> Arc<Self> {
        Arc::new(Self {
            reply,
            prompts: Mutex::new(Vec::new()),
        })
    }
}

impl SuggestionProvider for ScriptedProvider {
    fn provider_id(&self) -> &str {
        "scripted"
    }

    fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply.clone()
    }
}

fn register(conn: &Connection) -> UserProfile {
    UserService::new(SqliteUserRepository::new(conn))
        .register("Ada", "ada@example.com")
        .unwrap()
}

fn seed_history(conn: &Connection, user: &UserProfile, names: &[&str]) {
    let repo = SqliteGroceryRepository::new(conn);
    for name in names {
        repo.append_history(user.id, name).unwrap();
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

#[test]
fn adding_items_records_history_in_insertion_order() {
    let conn = open_db_in_memory().unwrap();
    let user = register(&conn);
    let service = GroceryService::new(SqliteGroceryRepository::new(&conn));

    service.add_item(user.id, " oat milk ", None, NOW).unwrap();
    let eggs = service.add_item(user.id, "eggs", Some(12), NOW + 1).unwrap();
    assert_eq!(eggs.qty, 12);

    let history = SqliteGroceryRepository::new(&conn)
        .list_history(user.id)
        .unwrap();
    assert_eq!(history, strings(&["oat milk", "eggs"]));

    let names = service
        .list_items(user.id)
        .unwrap()
        .into_iter()
        .map(|item| item.name)
        .collect::<Vec<_>>();
    assert_eq!(names, strings(&["eggs", "oat milk"]));
}

#[test]
fn zero_quantity_and_blank_names_are_rejected() {
    let conn = open_db_in_memory().unwrap();
    let user = register(&conn);
    let service = GroceryService::new(SqliteGroceryRepository::new(&conn));

    assert!(service
        .add_item(user.id, "rice", Some(0), NOW)
        .unwrap_err()
        .is_client_error());
    assert!(matches!(
        service.add_item(user.id, "  ", None, NOW).unwrap_err(),
        ServiceError::Invalid(_)
    ));
    assert!(service.list_items(user.id).unwrap().is_empty());
}

#[test]
fn checking_an_item_keeps_history_untouched() {
    let conn = open_db_in_memory().unwrap();
    let user = register(&conn);
    let service = GroceryService::new(SqliteGroceryRepository::new(&conn));
    let item = service.add_item(user.id, "bread", None, NOW).unwrap();

    let checked = service
        .update_item(
            user.id,
            item.id,
            GroceryPatch {
                checked: Some(true),
                ..GroceryPatch::default()
            },
        )
        .unwrap();
    assert!(checked.checked);

    service.delete_item(user.id, item.id).unwrap();
    assert_eq!(
        SqliteGroceryRepository::new(&conn)
            .list_history(user.id)
            .unwrap(),
        strings(&["bread"])
    );
}

#[test]
fn empty_history_yields_fallback_list() {
    let conn = open_db_in_memory().unwrap();
    let user = register(&conn);
    let service = GroceryService::new(SqliteGroceryRepository::new(&conn));

    let suggestions = service
        .suggest(user.id, &SuggestionContext::default())
        .unwrap();
    assert_eq!(
        suggestions,
        strings(&["Milk", "Eggs", "Bread", "Coffee", "Bananas"])
    );
}

#[test]
fn history_frequency_leads_and_fallback_fills_without_duplicates() {
    let conn = open_db_in_memory().unwrap();
    let user = register(&conn);
    seed_history(&conn, &user, &["milk", "Milk", "eggs", "milk"]);
    let service = GroceryService::new(SqliteGroceryRepository::new(&conn));

    let suggestions = service
        .suggest(user.id, &SuggestionContext::default())
        .unwrap();
    assert_eq!(
        suggestions,
        strings(&["Milk", "Eggs", "Bread", "Coffee", "Bananas"])
    );
}

#[test]
fn parsed_provider_reply_replaces_heuristic() {
    let conn = open_db_in_memory().unwrap();
    let user = register(&conn);
    seed_history(&conn, &user, &["tortillas"]);
    let provider = ScriptedProvider::new(Ok(
        "Sure! [\"Salsa\", \"Avocados\", \"salsa\", \"Limes\"]".to_string(),
    ));
    let service = GroceryService::new(SqliteGroceryRepository::new(&conn))
        .with_provider(provider.clone());

    let context = SuggestionContext {
        tasks: vec!["Taco night".to_string()],
    };
    let suggestions = service.suggest(user.id, &context).unwrap();
    assert_eq!(suggestions, strings(&["Salsa", "Avocados", "Limes"]));

    let prompts = provider.prompts.lock().unwrap();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("tortillas"));
    assert!(prompts[0].contains("Taco night"));
}

#[test]
fn provider_failure_falls_back_to_heuristic() {
    let conn = open_db_in_memory().unwrap();
    let user = register(&conn);
    seed_history(&conn, &user, &["coffee", "coffee", "apples"]);

    for reply in [
        Err(ProviderError::Timeout),
        Err(ProviderError::Status {
            code: 500,
            body: "upstream".to_string(),
        }),
        Ok("[not json".to_string() + "]"),
    ] {
        let service = GroceryService::new(SqliteGroceryRepository::new(&conn))
            .with_provider(ScriptedProvider::new(reply));
        let suggestions = service
            .suggest(user.id, &SuggestionContext::default())
            .unwrap();
        assert_eq!(
            suggestions,
            strings(&["Coffee", "Apples", "Milk", "Eggs", "Bread", "Bananas"])
        );
    }
}
