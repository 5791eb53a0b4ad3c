//! Unified error type for CLI commands.

use std::path::PathBuf;

use pricemate_core::state::StateError;
use pricemate_core::{Barcode, BarcodeError};
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by `pricemate` commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A data file could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// A JSON data file could not be parsed or failed validation.
    #[error("Invalid JSON in {path}: {source}")]
    Json {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        source: serde_json::Error,
    },

    /// A YAML data file could not be parsed or failed validation.
    #[error("Invalid YAML in {path}: {source}")]
    Yaml {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        source: serde_yaml::Error,
    },

    /// Barcode argument is malformed.
    #[error("Invalid barcode: {0}")]
    Barcode(#[from] BarcodeError),

    /// A command-line argument has an invalid value.
    #[error("Invalid value for {0}: {1}")]
    InvalidArgument(&'static str, String),

    /// Category argument is not a known category.
    #[error("{0}")]
    Category(String),

    /// The product has no catalog entry or no prices.
    #[error("Product not found: {0}")]
    ProductNotFound(Barcode),

    /// An application state command failed.
    #[error("State error: {0}")]
    State(#[from] StateError),
}
