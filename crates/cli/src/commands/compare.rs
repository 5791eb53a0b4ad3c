//! Price comparison command.
//!
//! # Usage
//!
//! ```bash
//! pricemate compare --catalog catalog.json --barcode 0628915410034
//! ```

use std::path::Path;

use chrono::Utc;
use pricemate_core::pricing::{self, ComparedEntry, PriceComparison};
use pricemate_core::{Barcode, Catalog, CurrencyCode};
use tracing::info;

use crate::config::CliConfig;
use crate::data::load_document;
use crate::error::CliError;

/// Compare one product's prices across stores.
///
/// # Errors
///
/// Returns [`CliError::ProductNotFound`] if the barcode is not in the catalog
/// or the product has no prices, or an error if the catalog cannot be loaded.
pub async fn run(catalog_path: &Path, barcode: &str, config: &CliConfig) -> Result<(), CliError> {
    let barcode = Barcode::parse(barcode)?;
    let catalog: Catalog = load_document(catalog_path).await?;
    info!(products = catalog.len(), "Loaded catalog");

    let product = catalog
        .get(&barcode)
        .ok_or_else(|| CliError::ProductNotFound(barcode.clone()))?;
    let comparison =
        pricing::compare(product, Utc::now()).ok_or(CliError::ProductNotFound(barcode))?;

    for line in render(&comparison, config.currency) {
        info!("{line}");
    }
    Ok(())
}

/// Report lines for a comparison: header, one line per store, footer.
#[must_use]
pub fn render(comparison: &PriceComparison<'_>, currency: CurrencyCode) -> Vec<String> {
    let product = comparison.product;
    let mut lines = Vec::with_capacity(comparison.entries.len() + 2);
    lines.push(format!(
        "{} ({}) - {} [{}], prices in {}",
        product.name,
        product.brand,
        product.barcode,
        product.category,
        currency.code()
    ));
    lines.extend(comparison.entries.iter().map(render_row));
    lines.push(format!(
        "Lowest {} / highest {} - save up to {} by choosing the cheapest store",
        comparison.lowest, comparison.highest, comparison.spread
    ));
    lines
}

/// One store line, e.g. `Costco 5.2 km $3.99 (was $4.99, -20%) LOWEST`.
#[must_use]
pub fn render_row(row: &ComparedEntry<'_>) -> String {
    let entry = row.entry;
    let mut line = format!(
        "{} {:.1} km {}",
        entry.store.name, entry.store.distance_km, entry.price
    );
    if let (Some(regular), Some(percent)) = (entry.regular_price, row.discount_percent) {
        line.push_str(&format!(" (was {regular}, -{percent}%)"));
    }
    if let Some(unit) = &entry.unit_price {
        line.push_str(&format!(" {unit}"));
    }
    if let Some(end) = entry.sale_end.filter(|_| row.on_sale) {
        line.push_str(&format!(" sale ends {}", end.format("%Y-%m-%d")));
    }
    if !entry.in_stock {
        line.push_str(" out of stock");
    }
    if entry.store.is_preferred {
        line.push_str(" *preferred*");
    }
    if row.is_lowest {
        line.push_str(" LOWEST");
    }
    line
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};
    use pricemate_core::{Price, PriceEntry, Product, Store};

    use super::*;

    fn price(cents: i64) -> Price {
        Price::from_cents(cents).unwrap()
    }

    #[test]
    fn test_render_row_flags() {
        let now = Utc.with_ymd_and_hms(2025, 8, 29, 12, 0, 0).unwrap();
        let entry = PriceEntry::new(Store::new("Costco", "cart.fill", 5.2), price(399), now)
            .with_regular_price(price(499))
            .with_sale_end(now + Duration::days(7))
            .with_unit_price("$1.00/100g");
        let product = Product {
            barcode: Barcode::parse("0628915410034").unwrap(),
            name: "Christie Oreo Cookies".to_string(),
            brand: "Christie".to_string(),
            category: "Snacks & Cookies".to_string(),
            image_url: None,
            prices: vec![entry],
        };

        let comparison = pricing::compare(&product, now).unwrap();
        let line = render_row(&comparison.entries[0]);
        assert_eq!(
            line,
            "Costco 5.2 km $3.99 (was $4.99, -20%) $1.00/100g sale ends 2025-09-05 LOWEST"
        );
    }

    #[test]
    fn test_render_out_of_stock_not_discounted() {
        let now = Utc::now();
        let entry = PriceEntry::new(Store::new("Sobeys", "cart.fill", 4.1), price(599), now)
            .with_regular_price(price(599))
            .out_of_stock();
        let cheaper = PriceEntry::new(Store::new("Metro", "cart.fill", 2.5), price(549), now);
        let product = Product {
            barcode: Barcode::parse("0628915410034").unwrap(),
            name: "Christie Oreo Cookies".to_string(),
            brand: "Christie".to_string(),
            category: "Snacks & Cookies".to_string(),
            image_url: None,
            prices: vec![entry, cheaper],
        };

        let comparison = pricing::compare(&product, now).unwrap();
        let lines = render(&comparison, CurrencyCode::CAD);
        assert_eq!(lines.len(), 4);
        assert!(lines[0].ends_with("prices in CAD"));
        assert_eq!(lines[1], "Metro 2.5 km $5.49 LOWEST");
        assert_eq!(lines[2], "Sobeys 4.1 km $5.99 out of stock");
        assert_eq!(
            lines[3],
            "Lowest $5.49 / highest $5.99 - save up to $0.50 by choosing the cheapest store"
        );
    }
}
