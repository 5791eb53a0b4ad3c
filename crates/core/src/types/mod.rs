//! Core types for PriceMate.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod barcode;
pub mod id;
pub mod price;
pub mod status;

pub use barcode::{Barcode, BarcodeError};
pub use id::*;
pub use price::{CurrencyCode, Price, PriceError};
pub use status::*;
