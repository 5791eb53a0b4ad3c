//! Shopping list items.

use serde::{Deserialize, Serialize};

use crate::types::{ItemCategory, Price, ShoppingItemId};

/// An entry on the user's shopping list.
///
/// Items start unchecked. The checked flag only changes through
/// [`ShoppingItem::toggle`]; quantity is validated by the owning list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingItem {
    /// Stable item ID, assigned when the item is created.
    #[serde(default = "ShoppingItemId::generate")]
    pub id: ShoppingItemId,
    /// Item name as entered by the user.
    pub name: String,
    /// Number of units wanted.
    pub quantity: u32,
    /// Price the user is hoping to pay per unit.
    #[serde(default)]
    pub target_price: Option<Price>,
    /// Aisle category.
    #[serde(default)]
    pub category: ItemCategory,
    /// Whether the item has been picked up.
    #[serde(default)]
    pub is_checked: bool,
}

impl ShoppingItem {
    /// Flip the checked state.
    pub const fn toggle(&mut self) {
        self.is_checked = !self.is_checked;
    }

    /// Quantity as a 64-bit count, for summing without overflow.
    #[must_use]
    pub fn units(&self) -> u64 {
        u64::from(self.quantity)
    }
}

/// Input for adding an item to the shopping list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewShoppingItem {
    /// Item name.
    pub name: String,
    /// Number of units wanted.
    pub quantity: u32,
    /// Optional per-unit target price.
    #[serde(default)]
    pub target_price: Option<Price>,
    /// Aisle category.
    #[serde(default)]
    pub category: ItemCategory,
}

impl NewShoppingItem {
    /// Create input with a name and quantity, no target price, category `Other`.
    #[must_use]
    pub fn new(name: impl Into<String>, quantity: u32) -> Self {
        Self {
            name: name.into(),
            quantity,
            target_price: None,
            category: ItemCategory::default(),
        }
    }

    /// Set the target price.
    #[must_use]
    pub const fn with_target_price(mut self, target_price: Price) -> Self {
        self.target_price = Some(target_price);
        self
    }

    /// Set the category.
    #[must_use]
    pub const fn with_category(mut self, category: ItemCategory) -> Self {
        self.category = category;
        self
    }

    /// Turn the input into an unchecked item with a fresh ID.
    ///
    /// Does not validate; the shopping list does that before inserting.
    #[must_use]
    pub fn into_item(self) -> ShoppingItem {
        ShoppingItem {
            id: ShoppingItemId::generate(),
            name: self.name.trim().to_owned(),
            quantity: self.quantity,
            target_price: self.target_price,
            category: self.category,
            is_checked: false,
        }
    }
}
