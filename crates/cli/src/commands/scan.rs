//! Barcode lookup command.
//!
//! Looks up each code in the catalog the way a scan would, records the
//! scan history, and reports the best in-stock price per hit.
//!
//! # Usage
//!
//! ```bash
//! pricemate scan --catalog catalog.json 0628915410034 06289154
//! ```

use std::path::Path;

use chrono::Utc;
use pricemate_core::pricing;
use pricemate_core::repository::Repositories;
use pricemate_core::state::AppState;
use pricemate_core::{Barcode, Catalog, Product};
use tracing::{info, warn};

use crate::config::CliConfig;
use crate::data::load_document;
use crate::error::CliError;

/// Look up barcodes and show the scan history.
///
/// Unknown barcodes are reported and recorded, not treated as errors.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or a barcode is malformed.
pub async fn run(
    catalog_path: &Path,
    barcodes: &[String],
    config: &CliConfig,
) -> Result<(), CliError> {
    let barcodes = barcodes
        .iter()
        .map(|code| Barcode::parse(code))
        .collect::<Result<Vec<_>, _>>()?;
    let catalog: Catalog = load_document(catalog_path).await?;

    let mut state = AppState::new(Repositories::in_memory());
    state.set_user_location(&config.user_location)?;
    info!(location = state.user_location(), "Scanning");

    for barcode in barcodes {
        let product = catalog.get(&barcode);
        match product {
            Some(product) => info!("{}", describe(product)),
            None => warn!(barcode = %barcode, "Product not found"),
        }
        state.record_scan(barcode, product, Utc::now())?;
    }

    for scan in state.recent_scans(config.recent_scan_limit) {
        info!(
            "{} {} {}",
            scan.scanned_at.format("%H:%M:%S"),
            scan.barcode,
            scan.product_name.as_deref().unwrap_or("(not found)")
        );
    }
    Ok(())
}

/// One-line description of a scanned product and where it is cheapest.
#[must_use]
pub fn describe(product: &Product) -> String {
    match pricing::best_in_stock(&product.prices) {
        Some(best) => format!(
            "{} ({}): best in-stock price {} at {}",
            product.name, product.barcode, best.price, best.store.name
        ),
        None => format!("{} ({}): not in stock anywhere", product.name, product.barcode),
    }
}
