//! CLI configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `PRICEMATE_DEFAULT_UNIT_PRICE` - Unit price assumed for list items
//!   without a target price (default: 4.99)
//! - `PRICEMATE_CURRENCY` - Currency code shown in reports (default: CAD)
//! - `PRICEMATE_RECENT_SCAN_LIMIT` - Scans shown in history (default: 10)
//! - `PRICEMATE_USER_LOCATION` - Location label (default: Toronto, ON)
//! - `PRICEMATE_LOG_FORMAT` - `text` or `json` (default: text)

use std::str::FromStr;

use pricemate_core::state::{DEFAULT_RECENT_SCAN_LIMIT, DEFAULT_USER_LOCATION};
use pricemate_core::{CurrencyCode, Price};
use rust_decimal::Decimal;
use thiserror::Error;

/// Unit price used when `PRICEMATE_DEFAULT_UNIT_PRICE` is not set.
pub const DEFAULT_UNIT_PRICE: &str = "4.99";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// PriceMate CLI configuration.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Fallback unit price for shopping list estimates
    pub default_unit_price: Price,
    /// Currency code for report headers
    pub currency: CurrencyCode,
    /// Number of recent scans to show
    pub recent_scan_limit: usize,
    /// User location label
    pub user_location: String,
    /// Emit structured JSON logs instead of text
    pub json_logs: bool,
}

impl CliConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get_or_default = |key: &str, default: &str| {
            lookup(key).unwrap_or_else(|| default.to_string())
        };

        let default_unit_price = parse_price(&get_or_default(
            "PRICEMATE_DEFAULT_UNIT_PRICE",
            DEFAULT_UNIT_PRICE,
        ))
        .map_err(|e| ConfigError::InvalidEnvVar("PRICEMATE_DEFAULT_UNIT_PRICE".to_string(), e))?;
        let currency = get_or_default("PRICEMATE_CURRENCY", CurrencyCode::default().code())
            .parse::<CurrencyCode>()
            .map_err(|e| ConfigError::InvalidEnvVar("PRICEMATE_CURRENCY".to_string(), e))?;
        let recent_scan_limit = get_or_default(
            "PRICEMATE_RECENT_SCAN_LIMIT",
            &DEFAULT_RECENT_SCAN_LIMIT.to_string(),
        )
        .parse::<usize>()
        .map_err(|e| {
            ConfigError::InvalidEnvVar("PRICEMATE_RECENT_SCAN_LIMIT".to_string(), e.to_string())
        })?;
        let user_location = get_or_default("PRICEMATE_USER_LOCATION", DEFAULT_USER_LOCATION);
        let json_logs = match get_or_default("PRICEMATE_LOG_FORMAT", "text")
            .to_ascii_lowercase()
            .as_str()
        {
            "text" => false,
            "json" => true,
            other => {
                return Err(ConfigError::InvalidEnvVar(
                    "PRICEMATE_LOG_FORMAT".to_string(),
                    format!("expected text or json, got {other}"),
                ));
            }
        };

        Ok(Self {
            default_unit_price,
            currency,
            recent_scan_limit,
            user_location,
            json_logs,
        })
    }
}

/// Parse a non-negative decimal price.
///
/// # Errors
///
/// Returns the reason if `value` is not a decimal or is negative.
pub fn parse_price(value: &str) -> Result<Price, String> {
    let amount = Decimal::from_str(value.trim()).map_err(|e| e.to_string())?;
    Price::new(amount).map_err(|e| e.to_string())
}
