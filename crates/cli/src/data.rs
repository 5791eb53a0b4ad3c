//! Data file loading.
//!
//! Catalogs, shopping lists and alerts are read from JSON files, or YAML
//! when the extension is `.yaml` or `.yml`. Deserialization runs the same
//! validation as the core constructors, so a negative price or duplicate
//! barcode fails the load.

use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::CliError;

/// Supported data file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
}

impl Format {
    /// Pick the format from a file extension, defaulting to JSON.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Self::Yaml
            }
            _ => Self::Json,
        }
    }
}

/// Parse a document already read into memory.
///
/// # Errors
///
/// Returns a JSON or YAML error tagged with `path`.
pub fn parse_document<T: DeserializeOwned>(path: &Path, content: &str) -> Result<T, CliError> {
    match Format::from_path(path) {
        Format::Json => serde_json::from_str(content).map_err(|source| CliError::Json {
            path: path.to_path_buf(),
            source,
        }),
        Format::Yaml => serde_yaml::from_str(content).map_err(|source| CliError::Yaml {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Read and parse a data file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub async fn load_document<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CliError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    debug!(path = %path.display(), bytes = content.len(), "Read data file");
    parse_document(path, &content)
}
