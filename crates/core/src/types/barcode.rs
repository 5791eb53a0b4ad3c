//! Product barcode type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Barcode`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BarcodeError {
    /// The input string is empty (after trimming).
    #[error("barcode cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("barcode must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains whitespace or control characters.
    #[error("barcode contains an invalid character: {0:?}")]
    InvalidCharacter(char),
}

/// A scanned or manually entered product code.
///
/// Scanners deliver retail symbologies (EAN-8, EAN-13, UPC-E, UPC-A) as
/// digit strings, but Code 128/39 and 2D codes carry arbitrary printable
/// text, so the only structural rules are the ones below.
///
/// ## Constraints
///
/// - Leading and trailing whitespace is trimmed
/// - Length: 1-128 characters
/// - No interior whitespace or control characters
///
/// ## Examples
///
/// ```
/// use pricemate_core::Barcode;
///
/// assert!(Barcode::parse("0628915410034").is_ok());
/// assert!(Barcode::parse(" 06289154 ").is_ok());
/// assert!(Barcode::parse("").is_err());
/// assert!(Barcode::parse("0628 9154").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "String", into = "String")]
pub struct Barcode(String);

impl Barcode {
    /// Maximum length of a barcode payload.
    pub const MAX_LENGTH: usize = 128;

    /// Parse a `Barcode` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed input is empty, longer than
    /// [`Self::MAX_LENGTH`], or contains whitespace or control characters.
    pub fn parse(s: &str) -> Result<Self, BarcodeError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(BarcodeError::Empty);
        }

        if s.chars().count() > Self::MAX_LENGTH {
            return Err(BarcodeError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if let Some(c) = s.chars().find(|c| c.is_whitespace() || c.is_control()) {
            return Err(BarcodeError::InvalidCharacter(c));
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the barcode as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this looks like a retail EAN/UPC code (8, 12 or 13 digits).
    #[must_use]
    pub fn is_retail(&self) -> bool {
        matches!(self.0.len(), 8 | 12 | 13) && self.0.bytes().all(|b| b.is_ascii_digit())
    }
}

impl fmt::Display for Barcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Barcode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Barcode {
    type Error = BarcodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Barcode> for String {
    fn from(barcode: Barcode) -> Self {
        barcode.0
    }
}

impl std::str::FromStr for Barcode {
    type Err = BarcodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
