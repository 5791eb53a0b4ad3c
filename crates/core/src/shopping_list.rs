//! The user's shopping list: a validated, insertion-ordered item collection.

use serde::{Deserialize, Serialize};

use crate::models::{NewShoppingItem, ShoppingItem};
use crate::types::ShoppingItemId;

/// Maximum length of an item name, in characters.
pub const MAX_NAME_LENGTH: usize = 120;

/// Errors returned by shopping list mutations.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ShoppingListError {
    /// Quantity must be at least one.
    #[error("quantity must be positive")]
    ZeroQuantity,
    /// Name is empty after trimming.
    #[error("item name cannot be empty")]
    EmptyName,
    /// Name exceeds [`MAX_NAME_LENGTH`].
    #[error("item name must be at most {max} characters")]
    NameTooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// No item with the given ID.
    #[error("shopping item not found: {0}")]
    ItemNotFound(ShoppingItemId),
    /// An item with the given ID is already on the list.
    #[error("shopping item already exists: {0}")]
    DuplicateItem(ShoppingItemId),
}

/// Check the user-editable fields of an item.
///
/// Prices are already non-negative by construction of [`crate::Price`].
///
/// # Errors
///
/// Returns the first rule the item breaks.
pub fn validate_item(item: &ShoppingItem) -> Result<(), ShoppingListError> {
    if item.quantity == 0 {
        return Err(ShoppingListError::ZeroQuantity);
    }
    let name = item.name.trim();
    if name.is_empty() {
        return Err(ShoppingListError::EmptyName);
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(ShoppingListError::NameTooLong {
            max: MAX_NAME_LENGTH,
        });
    }
    Ok(())
}

/// Trim the item's name, then check it.
///
/// # Errors
///
/// Returns the first rule the item breaks.
pub fn normalize_item(mut item: ShoppingItem) -> Result<ShoppingItem, ShoppingListError> {
    let trimmed = item.name.trim();
    if trimmed.len() != item.name.len() {
        item.name = trimmed.to_string();
    }
    validate_item(&item)?;
    Ok(item)
}

/// Ordered collection of shopping items, owned exclusively by the list.
///
/// Adds append, updates replace in place, removals close the gap; relative
/// order of the remaining items never changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ShoppingItem>", into = "Vec<ShoppingItem>")]
pub struct ShoppingList {
    items: Vec<ShoppingItem>,
}

impl ShoppingList {
    /// Create an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Build a list from stored items, validating each.
    ///
    /// # Errors
    ///
    /// Returns an error if any item is invalid or two items share an ID.
    pub fn from_items(items: Vec<ShoppingItem>) -> Result<Self, ShoppingListError> {
        let mut list = Self::new();
        for item in items {
            list.insert(item)?;
        }
        Ok(list)
    }

    /// Items in list order.
    #[must_use]
    pub fn items(&self) -> &[ShoppingItem] {
        &self.items
    }

    /// Number of rows on the list.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look up an item by ID.
    #[must_use]
    pub fn get(&self, id: ShoppingItemId) -> Option<&ShoppingItem> {
        self.items.iter().find(|item| item.id == id)
    }

    fn position(&self, id: ShoppingItemId) -> Result<usize, ShoppingListError> {
        self.items
            .iter()
            .position(|item| item.id == id)
            .ok_or(ShoppingListError::ItemNotFound(id))
    }

    /// Build an item from user input without adding it.
    ///
    /// Lets callers persist the item before committing it to the list.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is invalid.
    pub fn prepare(new: NewShoppingItem) -> Result<ShoppingItem, ShoppingListError> {
        let item = new.into_item();
        validate_item(&item)?;
        Ok(item)
    }

    /// Append a new unchecked item built from user input, returning a copy.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is invalid; the list is unchanged.
    pub fn add(&mut self, new: NewShoppingItem) -> Result<ShoppingItem, ShoppingListError> {
        let item = Self::prepare(new)?;
        self.insert(item)
    }

    /// Append an existing item, keeping its ID and checked state.
    ///
    /// The name is trimmed. Returns a copy of the stored item.
    ///
    /// # Errors
    ///
    /// Returns an error if the item is invalid or its ID is already present.
    pub fn insert(&mut self, item: ShoppingItem) -> Result<ShoppingItem, ShoppingListError> {
        let item = normalize_item(item)?;
        if self.get(item.id).is_some() {
            return Err(ShoppingListError::DuplicateItem(item.id));
        }
        self.items.push(item.clone());
        Ok(item)
    }

    /// Replace an item in place, matched by ID. The name is trimmed.
    ///
    /// # Errors
    ///
    /// Returns an error if the item is invalid or not on the list.
    pub fn update(&mut self, item: ShoppingItem) -> Result<(), ShoppingListError> {
        let item = normalize_item(item)?;
        let index = self.position(item.id)?;
        if let Some(slot) = self.items.get_mut(index) {
            *slot = item;
        }
        Ok(())
    }

    /// Remove an item, returning it.
    ///
    /// # Errors
    ///
    /// Returns [`ShoppingListError::ItemNotFound`] if the ID is not on the list.
    pub fn remove(&mut self, id: ShoppingItemId) -> Result<ShoppingItem, ShoppingListError> {
        let index = self.position(id)?;
        Ok(self.items.remove(index))
    }

    /// Flip an item's checked state, returning the new state.
    ///
    /// # Errors
    ///
    /// Returns [`ShoppingListError::ItemNotFound`] if the ID is not on the list.
    pub fn toggle(&mut self, id: ShoppingItemId) -> Result<bool, ShoppingListError> {
        let item = self
            .items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or(ShoppingListError::ItemNotFound(id))?;
        item.toggle();
        Ok(item.is_checked)
    }

    /// Remove every checked item, returning how many rows were dropped.
    pub fn clear_checked(&mut self) -> usize {
        let before = self.items.len();
        self.items.retain(|item| !item.is_checked);
        before - self.items.len()
    }
}

impl TryFrom<Vec<ShoppingItem>> for ShoppingList {
    type Error = ShoppingListError;

    fn try_from(items: Vec<ShoppingItem>) -> Result<Self, Self::Error> {
        Self::from_items(items)
    }
}

impl From<ShoppingList> for Vec<ShoppingItem> {
    fn from(list: ShoppingList) -> Self {
        list.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ItemCategory, Price};

    fn names(list: &ShoppingList) -> Vec<&str> {
        list.items().iter().map(|i| i.name.as_str()).collect()
    }

    #[test]
    fn test_add_preserves_order() {
        let mut list = ShoppingList::new();
        list.add(NewShoppingItem::new("Milk", 1)).unwrap();
        list.add(NewShoppingItem::new("Bread", 2)).unwrap();
        list.add(NewShoppingItem::new("Eggs", 12)).unwrap();
        assert_eq!(names(&list), ["Milk", "Bread", "Eggs"]);
    }

    #[test]
    fn test_add_rejects_zero_quantity() {
        let mut list = ShoppingList::new();
        let err = list.add(NewShoppingItem::new("Milk", 0)).unwrap_err();
        assert_eq!(err, ShoppingListError::ZeroQuantity);
        assert!(list.is_empty());
    }

    #[test]
    fn test_add_rejects_blank_name() {
        let mut list = ShoppingList::new();
        let err = list.add(NewShoppingItem::new("   ", 1)).unwrap_err();
        assert_eq!(err, ShoppingListError::EmptyName);
    }

    #[test]
    fn test_add_rejects_long_name() {
        let mut list = ShoppingList::new();
        let name = "x".repeat(MAX_NAME_LENGTH + 1);
        let err = list.add(NewShoppingItem::new(name, 1)).unwrap_err();
        assert_eq!(
            err,
            ShoppingListError::NameTooLong {
                max: MAX_NAME_LENGTH
            }
        );
    }

    #[test]
    fn test_remove_closes_gap() {
        let mut list = ShoppingList::new();
        list.add(NewShoppingItem::new("Milk", 1)).unwrap();
        let bread = list.add(NewShoppingItem::new("Bread", 1)).unwrap().id;
        list.add(NewShoppingItem::new("Eggs", 1)).unwrap();

        let removed = list.remove(bread).unwrap();
        assert_eq!(removed.name, "Bread");
        assert_eq!(names(&list), ["Milk", "Eggs"]);
        assert_eq!(
            list.remove(bread).unwrap_err(),
            ShoppingListError::ItemNotFound(bread)
        );
    }

    #[test]
    fn test_toggle_twice_restores_state() {
        let mut list = ShoppingList::new();
        let id = list.add(NewShoppingItem::new("Milk", 1)).unwrap().id;
        let before = list.clone();

        assert!(list.toggle(id).unwrap());
        assert!(!list.toggle(id).unwrap());
        assert_eq!(list, before);
    }

    #[test]
    fn test_toggle_unknown_item() {
        let mut list = ShoppingList::new();
        let id = ShoppingItemId::generate();
        assert_eq!(list.toggle(id), Err(ShoppingListError::ItemNotFound(id)));
    }

    #[test]
    fn test_update_in_place_keeps_id() {
        let mut list = ShoppingList::new();
        list.add(NewShoppingItem::new("Milk", 1)).unwrap();
        let mut item = list.add(NewShoppingItem::new("Bread", 1)).unwrap();

        item.quantity = 3;
        item.target_price = Some(Price::from_cents(250).unwrap());
        item.category = ItemCategory::Bakery;
        list.update(item.clone()).unwrap();

        assert_eq!(list.items()[1], item);
        assert_eq!(names(&list), ["Milk", "Bread"]);
    }

    #[test]
    fn test_update_rejects_invalid() {
        let mut list = ShoppingList::new();
        let mut item = list.add(NewShoppingItem::new("Milk", 1)).unwrap();
        item.quantity = 0;
        assert_eq!(list.update(item), Err(ShoppingListError::ZeroQuantity));
        assert_eq!(list.items()[0].quantity, 1);
    }

    #[test]
    fn test_insert_and_update_trim_names() {
        let mut raw = NewShoppingItem::new("Milk", 1).into_item();
        raw.name = "  Milk  ".to_string();
        let mut list = ShoppingList::from_items(vec![raw]).unwrap();
        assert_eq!(names(&list), ["Milk"]);

        let mut item = list.items()[0].clone();
        item.name = "\tOat Milk ".to_string();
        list.update(item).unwrap();
        assert_eq!(names(&list), ["Oat Milk"]);
    }

    #[test]
    fn test_insert_rejects_duplicate_id() {
        let item = NewShoppingItem::new("Milk", 1).into_item();
        let err = ShoppingList::from_items(vec![item.clone(), item.clone()]).unwrap_err();
        assert_eq!(err, ShoppingListError::DuplicateItem(item.id));
    }

    #[test]
    fn test_clear_checked() {
        let mut list = ShoppingList::new();
        let milk = list.add(NewShoppingItem::new("Milk", 1)).unwrap().id;
        list.add(NewShoppingItem::new("Bread", 1)).unwrap();
        list.toggle(milk).unwrap();

        assert_eq!(list.clear_checked(), 1);
        assert_eq!(names(&list), ["Bread"]);
    }
}
