//! Grocery list model.
//!
//! Items are the user's current shopping list. History is a separate,
//! append-only list of item names used by the suggestion engine.

use crate::model::user::UserId;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a grocery list item.
pub type GroceryItemId = Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroceryItem {
    pub id: GroceryItemId,
    pub user_id: UserId,
    /// Trimmed display name.
    pub name: String,
    pub qty: u32,
    pub checked: bool,
    /// Epoch milliseconds.
    pub created_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroceryValidationError {
    NilId,
    EmptyName,
    ZeroQuantity,
}

impl Display for GroceryValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "grocery item id must not be nil"),
            Self::EmptyName => write!(f, "grocery item name must not be empty"),
            Self::ZeroQuantity => write!(f, "grocery item qty must be at least 1"),
        }
    }
}

impl Error for GroceryValidationError {}

impl GroceryItem {
    /// Creates an unchecked item with quantity 1. The name is trimmed.
    pub fn new(user_id: UserId, name: impl Into<String>, created_at: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            name: name.into().trim().to_string(),
            qty: 1,
            checked: false,
            created_at,
        }
    }

    pub fn validate(&self) -> Result<(), GroceryValidationError> {
        if self.id.is_nil() {
            return Err(GroceryValidationError::NilId);
        }
        if self.name.trim().is_empty() {
            return Err(GroceryValidationError::EmptyName);
        }
        if self.qty == 0 {
            return Err(GroceryValidationError::ZeroQuantity);
        }
        Ok(())
    }
}
