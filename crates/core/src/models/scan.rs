//! Barcode scan history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Barcode, ScanRecordId};

/// A single barcode lookup made by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanRecord {
    /// Stable record ID.
    pub id: ScanRecordId,
    /// Scanned code.
    pub barcode: Barcode,
    /// Name of the matched product, if the lookup found one.
    pub product_name: Option<String>,
    /// When the scan happened.
    pub scanned_at: DateTime<Utc>,
}

impl ScanRecord {
    /// Record a scan.
    #[must_use]
    pub fn new(barcode: Barcode, product_name: Option<String>, scanned_at: DateTime<Utc>) -> Self {
        Self {
            id: ScanRecordId::generate(),
            barcode,
            product_name,
            scanned_at,
        }
    }
}
