//! Integration tests for PriceMate.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p pricemate-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `price_comparison` - Catalog loading and cross-store comparison
//! - `shopping_list` - List editing and cost estimation
//! - `app_state` - Application state commands over in-memory repositories

#![cfg_attr(not(test), forbid(unsafe_code))]
