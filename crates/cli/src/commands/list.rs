//! Shopping list commands.
//!
//! # Usage
//!
//! ```bash
//! # Summarize a whole list
//! pricemate list summary --file list.json
//!
//! # Only the dairy aisle, assuming $3.50 for items without a target price
//! pricemate list summary --file list.yaml --category dairy --default-price 3.50
//! ```

use std::path::Path;

use pricemate_core::estimator::{self, CategoryCount, ListSummary};
use pricemate_core::shopping_list::ShoppingList;
use pricemate_core::{ItemCategory, Price, ShoppingItem};
use tracing::info;

use crate::config::{CliConfig, parse_price};
use crate::data::load_document;
use crate::error::CliError;

/// Summarize a shopping list file.
///
/// `default_price` overrides the configured fallback unit price.
///
/// # Errors
///
/// Returns an error if the file cannot be loaded, the category is unknown,
/// or the price override is invalid.
pub async fn summary(
    path: &Path,
    category: Option<&str>,
    default_price: Option<&str>,
    config: &CliConfig,
) -> Result<(), CliError> {
    let category = category
        .map(str::parse::<ItemCategory>)
        .transpose()
        .map_err(CliError::Category)?;
    let default_unit_price = match default_price {
        Some(value) => parse_price(value)
            .map_err(|reason| CliError::InvalidArgument("--default-price", reason))?,
        None => config.default_unit_price,
    };

    let list: ShoppingList = load_document(path).await?;
    let items: Vec<ShoppingItem> = match category {
        Some(category) => estimator::filter_by_category(list.items(), category)
            .cloned()
            .collect(),
        None => list.items().to_vec(),
    };

    let summary = estimator::summarize(&items, default_unit_price);
    for line in render(&summary, &estimator::category_breakdown(&items)) {
        info!("{line}");
    }
    Ok(())
}

/// Report lines for a list summary.
#[must_use]
pub fn render(summary: &ListSummary, breakdown: &[CategoryCount]) -> Vec<String> {
    let mut lines = vec![
        format!(
            "{} of {} items ({}%)",
            summary.checked_items,
            summary.total_items,
            summary.percent_complete()
        ),
        format!(
            "Est. Total: {} (unpriced items at {} each)",
            format_amount(summary.estimated_total),
            summary.default_unit_price
        ),
    ];
    lines.extend(breakdown.iter().map(|count| {
        format!(
            "  {}: {}/{}",
            count.category, count.checked, count.total
        )
    }));
    lines
}

fn format_amount(amount: rust_decimal::Decimal) -> String {
    Price::new(amount).map_or_else(|_| format!("{amount:.2}"), |price| price.to_string())
}
