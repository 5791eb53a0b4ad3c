//! Products, per-store price entries and the product catalog.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Store;
use crate::types::{Barcode, Price, PriceEntryId};

/// One store's current offer for a product.
///
/// Deserializing a bare entry requires its `id`. Entries read as part of a
/// [`Product`] may leave it out and get [`PriceEntryId::for_offer`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceEntry {
    /// Stable entry ID.
    pub id: PriceEntryId,
    /// Store making the offer.
    pub store: Store,
    /// Current shelf price.
    pub price: Price,
    /// Regular (pre-sale) price, if known.
    #[serde(default)]
    pub regular_price: Option<Price>,
    /// When the current sale ends, if it is time-limited.
    #[serde(default)]
    pub sale_end: Option<DateTime<Utc>>,
    /// Unit price label as printed on the shelf tag (e.g., "$1.25/100g").
    #[serde(default)]
    pub unit_price: Option<String>,
    /// Whether the store has the product in stock.
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
    /// When this price was last observed.
    pub last_updated: DateTime<Utc>,
}

const fn default_in_stock() -> bool {
    true
}

impl PriceEntry {
    /// Create an in-stock entry with no sale information.
    #[must_use]
    pub fn new(store: Store, price: Price, last_updated: DateTime<Utc>) -> Self {
        Self {
            id: PriceEntryId::generate(),
            store,
            price,
            regular_price: None,
            sale_end: None,
            unit_price: None,
            in_stock: true,
            last_updated,
        }
    }

    /// Set the regular price.
    #[must_use]
    pub const fn with_regular_price(mut self, regular_price: Price) -> Self {
        self.regular_price = Some(regular_price);
        self
    }

    /// Set the sale end time.
    #[must_use]
    pub const fn with_sale_end(mut self, sale_end: DateTime<Utc>) -> Self {
        self.sale_end = Some(sale_end);
        self
    }

    /// Set the unit price label.
    #[must_use]
    pub fn with_unit_price(mut self, unit_price: impl Into<String>) -> Self {
        self.unit_price = Some(unit_price.into());
        self
    }

    /// Mark the entry as out of stock.
    #[must_use]
    pub const fn out_of_stock(mut self) -> Self {
        self.in_stock = false;
        self
    }
}

/// A product and its price entries across stores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ProductRecord")]
pub struct Product {
    /// Barcode identifying the product in the catalog.
    pub barcode: Barcode,
    /// Product name (e.g., "Christie Oreo Cookies").
    pub name: String,
    /// Brand name.
    pub brand: String,
    /// Free-text catalog category (e.g., "Snacks & Cookies").
    pub category: String,
    /// Optional product image URL.
    #[serde(default)]
    pub image_url: Option<String>,
    /// Price entries, in source order.
    #[serde(default)]
    pub prices: Vec<PriceEntry>,
}

/// Product as written in a data file, where entry IDs are optional.
#[derive(Deserialize)]
struct ProductRecord {
    barcode: Barcode,
    name: String,
    brand: String,
    category: String,
    #[serde(default)]
    image_url: Option<String>,
    #[serde(default)]
    prices: Vec<PriceEntryRecord>,
}

#[derive(Deserialize)]
struct PriceEntryRecord {
    #[serde(default)]
    id: Option<PriceEntryId>,
    store: Store,
    price: Price,
    #[serde(default)]
    regular_price: Option<Price>,
    #[serde(default)]
    sale_end: Option<DateTime<Utc>>,
    #[serde(default)]
    unit_price: Option<String>,
    #[serde(default = "default_in_stock")]
    in_stock: bool,
    last_updated: DateTime<Utc>,
}

impl From<ProductRecord> for Product {
    fn from(record: ProductRecord) -> Self {
        let prices = record
            .prices
            .into_iter()
            .map(|entry| PriceEntry {
                id: entry
                    .id
                    .unwrap_or_else(|| PriceEntryId::for_offer(&record.barcode, entry.store.id)),
                store: entry.store,
                price: entry.price,
                regular_price: entry.regular_price,
                sale_end: entry.sale_end,
                unit_price: entry.unit_price,
                in_stock: entry.in_stock,
                last_updated: entry.last_updated,
            })
            .collect();
        Self {
            barcode: record.barcode,
            name: record.name,
            brand: record.brand,
            category: record.category,
            image_url: record.image_url,
            prices,
        }
    }
}

/// Errors that can occur when building a [`Catalog`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Two products share a barcode.
    #[error("duplicate barcode in catalog: {0}")]
    DuplicateBarcode(Barcode),
    /// A price entry references a store with a negative or non-finite distance.
    #[error("store {store} for product {barcode} has an invalid distance")]
    InvalidDistance {
        /// Product whose entry is invalid.
        barcode: Barcode,
        /// Store name.
        store: String,
    },
}

/// A set of products keyed by barcode.
///
/// Construction enforces barcode uniqueness and store distance validity,
/// including when deserialized from a data file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Product>", into = "Vec<Product>")]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from a list of products.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateBarcode`] if two products share a
    /// barcode, or [`CatalogError::InvalidDistance`] if any store has a
    /// negative or non-finite distance.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            if !seen.insert(&product.barcode) {
                return Err(CatalogError::DuplicateBarcode(product.barcode.clone()));
            }
            if let Some(entry) = product
                .prices
                .iter()
                .find(|entry| !entry.store.has_valid_distance())
            {
                return Err(CatalogError::InvalidDistance {
                    barcode: product.barcode.clone(),
                    store: entry.store.name.clone(),
                });
            }
        }
        Ok(Self { products })
    }

    /// Look up a product by barcode.
    #[must_use]
    pub fn get(&self, barcode: &Barcode) -> Option<&Product> {
        self.products.iter().find(|p| &p.barcode == barcode)
    }

    /// All products, in source order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog has no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl TryFrom<Vec<Product>> for Catalog {
    type Error = CatalogError;

    fn try_from(products: Vec<Product>) -> Result<Self, Self::Error> {
        Self::new(products)
    }
}

impl From<Catalog> for Vec<Product> {
    fn from(catalog: Catalog) -> Self {
        catalog.products
    }
}
