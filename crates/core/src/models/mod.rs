//! Domain records: stores, products, shopping items, alerts and scans.

pub mod alert;
pub mod product;
pub mod scan;
pub mod shopping;
pub mod store;

pub use alert::{AlertNotification, PriceAlert};
pub use product::{Catalog, CatalogError, PriceEntry, Product};
pub use scan::ScanRecord;
pub use shopping::{NewShoppingItem, ShoppingItem};
pub use store::Store;
