//! Grocery list and history repository.
//!
//! # Responsibility
//! - Provide user-scoped CRUD over `grocery_items`.
//! - Own the append-only `grocery_history` list read by suggestions.
//!
//! # Invariants
//! - `create_item` appends the item name to history in the same transaction.
//! - History is returned in insertion order and is never rewritten.
//! - Items are listed newest first.

use crate::model::grocery::{GroceryItem, GroceryItemId};
use crate::model::user::UserId;
use crate::repo::{bool_to_int, parse_bool, parse_uuid, RepoError, RepoResult};
use rusqlite::{params, Connection, Row, Transaction, TransactionBehavior};

const ITEM_SELECT_SQL: &str = "SELECT
    id,
    user_id,
    name,
    qty,
    checked,
    created_at
FROM grocery_items";

pub trait GroceryRepository {
    /// Inserts one item and records its name in the owner's history.
    fn create_item(&self, item: &GroceryItem) -> RepoResult<GroceryItemId>;
    fn update_item(&self, item: &GroceryItem) -> RepoResult<()>;
    fn get_item(&self, user_id: UserId, id: GroceryItemId) -> RepoResult<Option<GroceryItem>>;
    fn list_items(&self, user_id: UserId) -> RepoResult<Vec<GroceryItem>>;
    fn delete_item(&self, user_id: UserId, id: GroceryItemId) -> RepoResult<()>;
    fn append_history(&self, user_id: UserId, name: &str) -> RepoResult<()>;
    /// Returns history names oldest first.
    fn list_history(&self, user_id: UserId) -> RepoResult<Vec<String>>;
}

/// SQLite-backed grocery repository.
pub struct SqliteGroceryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteGroceryRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl GroceryRepository for SqliteGroceryRepository<'_> {
    fn create_item(&self, item: &GroceryItem) -> RepoResult<GroceryItemId> {
        item.validate()?;

        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        tx.execute(
            "INSERT INTO grocery_items (id, user_id, name, qty, checked, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                item.id.to_string(),
                item.user_id.to_string(),
                item.name.as_str(),
                item.qty,
                bool_to_int(item.checked),
                item.created_at,
            ],
        )?;
        tx.execute(
            "INSERT INTO grocery_history (user_id, name) VALUES (?1, ?2);",
            params![item.user_id.to_string(), item.name.trim()],
        )?;
        tx.commit()?;

        Ok(item.id)
    }

    fn update_item(&self, item: &GroceryItem) -> RepoResult<()> {
        item.validate()?;

        let changed = self.conn.execute(
            "UPDATE grocery_items
             SET name = ?1, qty = ?2, checked = ?3
             WHERE id = ?4
               AND user_id = ?5;",
            params![
                item.name.as_str(),
                item.qty,
                bool_to_int(item.checked),
                item.id.to_string(),
                item.user_id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(item.id));
        }

        Ok(())
    }

    fn get_item(&self, user_id: UserId, id: GroceryItemId) -> RepoResult<Option<GroceryItem>> {
        let mut stmt = self.conn.prepare(&format!(
            "{ITEM_SELECT_SQL} WHERE id = ?1 AND user_id = ?2;"
        ))?;

        let mut rows = stmt.query(params![id.to_string(), user_id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_item_row(row)?));
        }

        Ok(None)
    }

    fn list_items(&self, user_id: UserId) -> RepoResult<Vec<GroceryItem>> {
        let mut stmt = self.conn.prepare(&format!(
            "{ITEM_SELECT_SQL} WHERE user_id = ?1 ORDER BY created_at DESC, id ASC;"
        ))?;

        let mut rows = stmt.query([user_id.to_string()])?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(parse_item_row(row)?);
        }

        Ok(items)
    }

    fn delete_item(&self, user_id: UserId, id: GroceryItemId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM grocery_items WHERE id = ?1 AND user_id = ?2;",
            params![id.to_string(), user_id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn append_history(&self, user_id: UserId, name: &str) -> RepoResult<()> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Ok(());
        }

        self.conn.execute(
            "INSERT INTO grocery_history (user_id, name) VALUES (?1, ?2);",
            params![user_id.to_string(), trimmed],
        )?;
        Ok(())
    }

    fn list_history(&self, user_id: UserId) -> RepoResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM grocery_history WHERE user_id = ?1 ORDER BY seq ASC;")?;

        let names = stmt
            .query_map([user_id.to_string()], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(names)
    }
}

fn parse_item_row(row: &Row<'_>) -> RepoResult<GroceryItem> {
    let id_text: String = row.get("id")?;
    let user_text: String = row.get("user_id")?;
    let qty = row.get::<_, i64>("qty")?;

    let item = GroceryItem {
        id: parse_uuid(&id_text, "grocery_items.id")?,
        user_id: parse_uuid(&user_text, "grocery_items.user_id")?,
        name: row.get("name")?,
        qty: u32::try_from(qty).map_err(|_| {
            RepoError::InvalidData(format!("invalid quantity `{qty}` in grocery_items.qty"))
        })?,
        checked: parse_bool(row.get("checked")?, "grocery_items.checked")?,
        created_at: row.get("created_at")?,
    };
    item.validate()?;
    Ok(item)
}
