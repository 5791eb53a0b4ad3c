//! Status and category enums for shopping entities.

use serde::{Deserialize, Serialize};

/// Aisle category for a shopping list item.
///
/// Declaration order is the display order used by category breakdowns.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum ItemCategory {
    Produce,
    Dairy,
    Meat,
    Bakery,
    Snacks,
    Beverages,
    #[default]
    Other,
}

impl ItemCategory {
    /// Every category, in display order.
    pub const ALL: [Self; 7] = [
        Self::Produce,
        Self::Dairy,
        Self::Meat,
        Self::Bakery,
        Self::Snacks,
        Self::Beverages,
        Self::Other,
    ];

    /// Human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Produce => "Produce",
            Self::Dairy => "Dairy",
            Self::Meat => "Meat",
            Self::Bakery => "Bakery",
            Self::Snacks => "Snacks",
            Self::Beverages => "Beverages",
            Self::Other => "Other",
        }
    }
}

impl std::fmt::Display for ItemCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for ItemCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("invalid category: {s}"))
    }
}

/// Lifecycle of a price alert.
///
/// `Active -> Triggered` when the target price is reached,
/// `Active -> Dismissed` when the user cancels it. Both are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AlertStatus {
    #[default]
    Active,
    Triggered,
    Dismissed,
}

impl AlertStatus {
    /// Whether the alert is still watching prices.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

impl std::fmt::Display for AlertStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Triggered => write!(f, "triggered"),
            Self::Dismissed => write!(f, "dismissed"),
        }
    }
}
