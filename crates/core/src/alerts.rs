//! Price alert evaluation.
//!
//! An alert watches one product, optionally at one store. Evaluating it
//! against the product's current price entries records the lowest in-stock
//! price and, once that price is at or below the target, moves the alert to
//! [`AlertStatus::Triggered`] and returns the message for the notification
//! collaborator. Alerts fire at most once.

use chrono::{DateTime, Utc};

use crate::models::{AlertNotification, PriceAlert, PriceEntry, Product};
use crate::types::{AlertStatus, Barcode};

/// Title used for every price alert notification.
pub const ALERT_TITLE: &str = "Price Alert!";

/// Errors returned by alert operations.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AlertError {
    /// The product passed in is not the one the alert watches.
    #[error("alert watches {expected}, got product {actual}")]
    ProductMismatch {
        /// Barcode on the alert.
        expected: Barcode,
        /// Barcode of the product supplied.
        actual: Barcode,
    },
    /// The alert has already fired or been dismissed.
    #[error("alert is no longer active ({0})")]
    NotActive(AlertStatus),
}

/// Cheapest in-stock entry the alert cares about.
#[must_use]
pub fn watched_entry<'a>(alert: &PriceAlert, product: &'a Product) -> Option<&'a PriceEntry> {
    product
        .prices
        .iter()
        .filter(|entry| entry.in_stock)
        .filter(|entry| alert.store_id.is_none_or(|id| entry.store.id == id))
        .min_by_key(|entry| entry.price)
}

/// Check an alert against the product's current prices.
///
/// Inactive alerts are left alone and yield `Ok(None)`.
///
/// # Errors
///
/// Returns [`AlertError::ProductMismatch`] if `product` is not the product
/// the alert was created for.
pub fn evaluate(
    alert: &mut PriceAlert,
    product: &Product,
    now: DateTime<Utc>,
) -> Result<Option<AlertNotification>, AlertError> {
    if alert.barcode != product.barcode {
        return Err(AlertError::ProductMismatch {
            expected: alert.barcode.clone(),
            actual: product.barcode.clone(),
        });
    }
    if !alert.is_active() {
        return Ok(None);
    }

    let Some(entry) = watched_entry(alert, product) else {
        return Ok(None);
    };
    alert.current_price = Some(entry.price);

    if entry.price > alert.target_price {
        return Ok(None);
    }

    alert.status = AlertStatus::Triggered;
    alert.triggered_at = Some(now);

    Ok(Some(AlertNotification {
        alert_id: alert.id,
        title: ALERT_TITLE.to_string(),
        body: format!(
            "{} is now {} at {} - At your target price!",
            product.name, entry.price, entry.store.name
        ),
        price: entry.price,
        store_name: entry.store.name.clone(),
    }))
}

/// Cancel an active alert.
///
/// # Errors
///
/// Returns [`AlertError::NotActive`] if the alert already fired or was dismissed.
pub fn dismiss(alert: &mut PriceAlert) -> Result<(), AlertError> {
    if !alert.is_active() {
        return Err(AlertError::NotActive(alert.status));
    }
    alert.status = AlertStatus::Dismissed;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Store;
    use crate::types::Price;

    fn price(cents: i64) -> Price {
        Price::from_cents(cents).unwrap()
    }

    fn oreo(entries: Vec<PriceEntry>) -> Product {
        Product {
            barcode: Barcode::parse("0628915410034").unwrap(),
            name: "Christie Oreo Cookies".to_string(),
            brand: "Christie".to_string(),
            category: "Snacks & Cookies".to_string(),
            image_url: None,
            prices: entries,
        }
    }

    fn entry(store: &Store, cents: i64) -> PriceEntry {
        PriceEntry::new(store.clone(), price(cents), Utc::now())
    }

    #[test]
    fn test_fires_when_target_reached() {
        let loblaws = Store::new("Loblaws", "cart.fill", 1.2);
        let costco = Store::new("Costco", "cart.fill", 5.2);
        let product = oreo(vec![entry(&loblaws, 499), entry(&costco, 399)]);
        let mut alert = PriceAlert::new(&product, price(400), None);
        let now = Utc::now();

        let note = evaluate(&mut alert, &product, now).unwrap().unwrap();
        assert_eq!(note.title, ALERT_TITLE);
        assert_eq!(
            note.body,
            "Christie Oreo Cookies is now $3.99 at Costco - At your target price!"
        );
        assert_eq!(note.price, price(399));
        assert_eq!(alert.status, AlertStatus::Triggered);
        assert_eq!(alert.triggered_at, Some(now));
        assert_eq!(alert.current_price, Some(price(399)));
    }

    #[test]
    fn test_fires_only_once() {
        let store = Store::new("Walmart", "cart.fill", 3.8);
        let product = oreo(vec![entry(&store, 300)]);
        let mut alert = PriceAlert::new(&product, price(300), None);

        assert!(evaluate(&mut alert, &product, Utc::now()).unwrap().is_some());
        assert!(evaluate(&mut alert, &product, Utc::now()).unwrap().is_none());
    }

    #[test]
    fn test_above_target_updates_current_price() {
        let store = Store::new("Metro", "cart.fill", 2.5);
        let product = oreo(vec![entry(&store, 549)]);
        let mut alert = PriceAlert::new(&product, price(450), None);

        assert!(evaluate(&mut alert, &product, Utc::now()).unwrap().is_none());
        assert!(alert.is_active());
        assert_eq!(alert.current_price, Some(price(549)));
    }

    #[test]
    fn test_store_restriction() {
        let metro = Store::new("Metro", "cart.fill", 2.5);
        let costco = Store::new("Costco", "cart.fill", 5.2);
        let product = oreo(vec![entry(&metro, 549), entry(&costco, 399)]);
        let mut alert = PriceAlert::new(&product, price(450), Some(metro.id));

        assert!(evaluate(&mut alert, &product, Utc::now()).unwrap().is_none());
        assert_eq!(alert.current_price, Some(price(549)));
    }

    #[test]
    fn test_out_of_stock_ignored() {
        let sobeys = Store::new("Sobeys", "cart.fill", 4.1);
        let product = oreo(vec![entry(&sobeys, 199).out_of_stock()]);
        let mut alert = PriceAlert::new(&product, price(450), None);

        assert!(evaluate(&mut alert, &product, Utc::now()).unwrap().is_none());
        assert!(alert.current_price.is_none());
    }

    #[test]
    fn test_product_mismatch() {
        let product = oreo(vec![]);
        let mut other = product.clone();
        other.barcode = Barcode::parse("06289154").unwrap();
        let mut alert = PriceAlert::new(&product, price(100), None);

        let err = evaluate(&mut alert, &other, Utc::now()).unwrap_err();
        assert!(matches!(err, AlertError::ProductMismatch { .. }));
    }

    #[test]
    fn test_dismiss() {
        let product = oreo(vec![]);
        let mut alert = PriceAlert::new(&product, price(100), None);

        dismiss(&mut alert).unwrap();
        assert_eq!(alert.status, AlertStatus::Dismissed);
        assert_eq!(
            dismiss(&mut alert),
            Err(AlertError::NotActive(AlertStatus::Dismissed))
        );
    }
}
