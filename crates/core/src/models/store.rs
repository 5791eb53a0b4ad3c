//! Grocery store records.

use serde::{Deserialize, Serialize};

use crate::types::StoreId;

/// A store that carries priced products.
///
/// Stores are referenced, not owned, by price entries: many entries may
/// point at the same store, and they compare equal by [`StoreId`].
///
/// A store read from a data file without an `id` gets
/// [`StoreId::from_name`], so the same store listed under several products,
/// or loaded again later, keeps one ID.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "StoreRecord")]
pub struct Store {
    /// Stable store ID.
    pub id: StoreId,
    /// Display name (e.g., "Loblaws").
    pub name: String,
    /// Logo reference (asset name or URL).
    #[serde(default)]
    pub logo: String,
    /// Distance from the user in kilometers.
    pub distance_km: f64,
    /// Whether the user has marked this store as preferred.
    #[serde(default)]
    pub is_preferred: bool,
}

impl PartialEq for Store {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Store {}

/// Store as written in a data file, where the ID is optional.
#[derive(Deserialize)]
struct StoreRecord {
    #[serde(default)]
    id: Option<StoreId>,
    name: String,
    #[serde(default)]
    logo: String,
    distance_km: f64,
    #[serde(default)]
    is_preferred: bool,
}

impl From<StoreRecord> for Store {
    fn from(record: StoreRecord) -> Self {
        Self {
            id: record.id.unwrap_or_else(|| StoreId::from_name(&record.name)),
            name: record.name,
            logo: record.logo,
            distance_km: record.distance_km,
            is_preferred: record.is_preferred,
        }
    }
}

impl Store {
    /// Create a new, non-preferred store with a fresh ID.
    #[must_use]
    pub fn new(name: impl Into<String>, logo: impl Into<String>, distance_km: f64) -> Self {
        Self {
            id: StoreId::generate(),
            name: name.into(),
            logo: logo.into(),
            distance_km,
            is_preferred: false,
        }
    }

    /// Whether the distance is a finite, non-negative number.
    #[must_use]
    pub fn has_valid_distance(&self) -> bool {
        self.distance_km.is_finite() && self.distance_km >= 0.0
    }
}
