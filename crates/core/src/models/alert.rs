//! Price alert records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Product;
use crate::types::{AlertStatus, Barcode, Price, PriceAlertId, StoreId};

/// A user's request to be told when a product reaches a target price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceAlert {
    /// Stable alert ID.
    #[serde(default = "PriceAlertId::generate")]
    pub id: PriceAlertId,
    /// Product being watched.
    pub barcode: Barcode,
    /// Product name at the time the alert was set.
    pub product_name: String,
    /// Price at or below which the alert fires.
    pub target_price: Price,
    /// Most recent lowest price seen for the watched stores.
    #[serde(default)]
    pub current_price: Option<Price>,
    /// Restrict the alert to a single store; `None` watches every store.
    #[serde(default)]
    pub store_id: Option<StoreId>,
    /// Lifecycle state.
    #[serde(default)]
    pub status: AlertStatus,
    /// When the alert fired.
    #[serde(default)]
    pub triggered_at: Option<DateTime<Utc>>,
}

impl PriceAlert {
    /// Create an active alert for a product.
    #[must_use]
    pub fn new(product: &Product, target_price: Price, store_id: Option<StoreId>) -> Self {
        Self {
            id: PriceAlertId::generate(),
            barcode: product.barcode.clone(),
            product_name: product.name.clone(),
            target_price,
            current_price: None,
            store_id,
            status: AlertStatus::Active,
            triggered_at: None,
        }
    }

    /// Whether the alert is still watching prices.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.status.is_active()
    }
}

/// Message handed to the notification collaborator when an alert fires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertNotification {
    /// Alert that fired.
    pub alert_id: PriceAlertId,
    /// Notification title.
    pub title: String,
    /// Notification body.
    pub body: String,
    /// Price that met the target.
    pub price: Price,
    /// Store offering that price.
    pub store_name: String,
}
