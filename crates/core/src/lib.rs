//! PriceMate Core - Price comparison and shopping list library.
//!
//! This crate holds the domain logic of the PriceMate grocery assistant:
//! - comparing one product's prices across stores
//! - estimating progress and cost of a shopping list
//! - watching products for target prices
//!
//! # Architecture
//!
//! The core crate contains types, pure computations and an explicit
//! application state - no file or network I/O. Persistence goes through the
//! [`repository::Repository`] trait, so any storage engine can sit behind it.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, prices, barcodes and statuses
//! - [`models`] - Stores, products, price entries, shopping items, alerts, scans
//! - [`pricing`] - Lowest price, discount and sale computations
//! - [`estimator`] - Shopping list counts, progress and estimated total
//! - [`shopping_list`] - Validated, ordered shopping list
//! - [`alerts`] - Price alert evaluation
//! - [`repository`] - Persistence seam and in-memory implementation
//! - [`state`] - Application state and its commands

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod alerts;
pub mod estimator;
pub mod models;
pub mod pricing;
pub mod repository;
pub mod shopping_list;
pub mod state;
pub mod types;

pub use models::*;
pub use types::*;
