//! Price alert commands.
//!
//! # Usage
//!
//! ```bash
//! pricemate alerts check --catalog catalog.json --alerts alerts.json
//! ```

use std::path::Path;

use chrono::Utc;
use pricemate_core::repository::{InMemoryRepository, Repositories};
use pricemate_core::state::AppState;
use pricemate_core::{AlertNotification, Catalog, PriceAlert};
use tracing::info;

use crate::data::load_document;
use crate::error::CliError;

/// Evaluate every active alert in `alerts_path` against the catalog.
///
/// # Errors
///
/// Returns an error if either file cannot be loaded or an alert refers to a
/// product it does not match.
pub async fn check(catalog_path: &Path, alerts_path: &Path) -> Result<(), CliError> {
    let catalog: Catalog = load_document(catalog_path).await?;
    let alerts: Vec<PriceAlert> = load_document(alerts_path).await?;

    let mut repos = Repositories::in_memory();
    repos.alerts = Box::new(InMemoryRepository::with_entities(alerts));
    let mut state = AppState::load(repos)?;

    let fired = state.evaluate_alerts(&catalog, Utc::now())?;
    for line in render(&fired, &state) {
        info!("{line}");
    }
    Ok(())
}

/// Report lines: one per fired alert, then one per alert still waiting.
#[must_use]
pub fn render(fired: &[AlertNotification], state: &AppState) -> Vec<String> {
    let mut lines: Vec<String> = fired
        .iter()
        .map(|note| format!("{}: {}", note.title, note.body))
        .collect();
    lines.extend(state.active_alerts().map(|alert| {
        let current = alert
            .current_price
            .map_or_else(|| "no price".to_string(), |price| price.to_string());
        format!(
            "Waiting: {} at {} or less (now {current})",
            alert.product_name, alert.target_price
        )
    }));
    if lines.is_empty() {
        lines.push("No active alerts".to_string());
    }
    lines
}
