//! Shopping list progress and cost estimation.
//!
//! Counts are in units (sum of quantities), not list rows. Every function
//! takes a slice, so callers pass a consistent snapshot of the list.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::ShoppingItem;
use crate::types::{ItemCategory, Price};

/// Total units on the list.
#[must_use]
pub fn total_item_count(items: &[ShoppingItem]) -> u64 {
    items.iter().map(ShoppingItem::units).sum()
}

/// Units on the list that have been checked off.
#[must_use]
pub fn checked_item_count(items: &[ShoppingItem]) -> u64 {
    items
        .iter()
        .filter(|item| item.is_checked)
        .map(ShoppingItem::units)
        .sum()
}

/// Fraction of units checked off, in `[0, 1]`. An empty list is `0.0`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn progress_ratio(items: &[ShoppingItem]) -> f64 {
    let total = total_item_count(items);
    if total == 0 {
        return 0.0;
    }
    checked_item_count(items) as f64 / total as f64
}

/// Estimated cost of the whole list.
///
/// Each item contributes `quantity * unit price`, where the unit price is
/// the item's target price or, when it has none, `default_unit_price`.
/// The fallback is always the caller's choice; there is no built-in default.
/// Prices are capped at [`Price::MAX`] and quantities are `u32`, so the sum
/// cannot overflow for any list that fits in memory.
#[must_use]
pub fn estimated_total(items: &[ShoppingItem], default_unit_price: Price) -> Decimal {
    items
        .iter()
        .map(|item| {
            let unit = item.target_price.unwrap_or(default_unit_price);
            Decimal::from(item.quantity) * unit.amount()
        })
        .sum()
}

/// Items in a single category, in list order.
pub fn filter_by_category(
    items: &[ShoppingItem],
    category: ItemCategory,
) -> impl Iterator<Item = &ShoppingItem> {
    items.iter().filter(move |item| item.category == category)
}

/// Unit counts for one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    /// Category.
    pub category: ItemCategory,
    /// Total units in the category.
    pub total: u64,
    /// Checked units in the category.
    pub checked: u64,
}

/// Per-category unit counts, in [`ItemCategory::ALL`] order.
///
/// Categories with no items are omitted.
#[must_use]
pub fn category_breakdown(items: &[ShoppingItem]) -> Vec<CategoryCount> {
    ItemCategory::ALL
        .into_iter()
        .filter_map(|category| {
            let mut rows = filter_by_category(items, category).peekable();
            rows.peek()?;
            let (total, checked) = rows.fold((0, 0), |(total, checked), item| {
                let units = item.units();
                (total + units, if item.is_checked { checked + units } else { checked })
            });
            Some(CategoryCount {
                category,
                total,
                checked,
            })
        })
        .collect()
}

/// Snapshot of a shopping list for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListSummary {
    /// Total units.
    pub total_items: u64,
    /// Checked units.
    pub checked_items: u64,
    /// `checked_items / total_items`, or `0.0` for an empty list.
    pub progress: f64,
    /// Estimated cost using the supplied fallback unit price.
    pub estimated_total: Decimal,
    /// Fallback unit price used for items without a target price.
    pub default_unit_price: Price,
}

impl ListSummary {
    /// Progress as a whole percentage, truncated (e.g., `0.667` is 66).
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn percent_complete(&self) -> u8 {
        (self.progress.clamp(0.0, 1.0) * 100.0) as u8
    }
}

/// Compute every summary figure from one snapshot of the list.
#[must_use]
pub fn summarize(items: &[ShoppingItem], default_unit_price: Price) -> ListSummary {
    ListSummary {
        total_items: total_item_count(items),
        checked_items: checked_item_count(items),
        progress: progress_ratio(items),
        estimated_total: estimated_total(items, default_unit_price),
        default_unit_price,
    }
}
