//! Price comparison over a product's per-store price entries.
//!
//! Every function here is pure: it reads the entries it is given and, where
//! sale windows matter, the `now` passed in by the caller. An empty entry set
//! never produces a zero price; it produces `None`, which callers surface as
//! "product not found".

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{PriceEntry, Product};
use crate::types::Price;

/// Minimum price across `entries`, or `None` if there are none.
#[must_use]
pub fn lowest_price(entries: &[PriceEntry]) -> Option<Price> {
    entries.iter().map(|e| e.price).min()
}

/// Maximum price across `entries`, or `None` if there are none.
#[must_use]
pub fn highest_price(entries: &[PriceEntry]) -> Option<Price> {
    entries.iter().map(|e| e.price).max()
}

/// Whether `entry` is priced at the minimum of `entries`.
///
/// Ties are not broken: every entry at the minimum price is lowest.
#[must_use]
pub fn is_lowest(entry: &PriceEntry, entries: &[PriceEntry]) -> bool {
    lowest_price(entries).is_some_and(|low| entry.price == low)
}

/// The entry's regular price, if it is strictly above the current price.
fn discounted_regular(entry: &PriceEntry) -> Option<Price> {
    entry.regular_price.filter(|regular| *regular > entry.price)
}

/// Discount off the regular price as a whole percentage.
///
/// Computed on the regular price: `round((regular - price) / regular * 100)`,
/// rounding half away from zero. `None` when there is no regular price or
/// it is not above the current price.
#[must_use]
pub fn discount_percent(entry: &PriceEntry) -> Option<u32> {
    let regular = discounted_regular(entry)?.amount();
    let fraction = (regular - entry.price.amount()).checked_div(regular)?;
    (fraction * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u32()
}

/// Absolute saving against the regular price, when discounted.
#[must_use]
pub fn savings(entry: &PriceEntry) -> Option<Price> {
    let regular = discounted_regular(entry)?;
    Price::new(regular.amount() - entry.price.amount()).ok()
}

/// Whether the entry is discounted and its sale window (if any) is still open.
#[must_use]
pub fn is_on_sale(entry: &PriceEntry, now: DateTime<Utc>) -> bool {
    discounted_regular(entry).is_some() && entry.sale_end.is_none_or(|end| now < end)
}

/// Cheapest entry whose store has the product in stock.
///
/// Among equal prices the earliest entry wins.
#[must_use]
pub fn best_in_stock(entries: &[PriceEntry]) -> Option<&PriceEntry> {
    entries
        .iter()
        .filter(|e| e.in_stock)
        .min_by_key(|e| e.price)
}

/// Display ordering: cheapest first, then preferred stores, then nearest.
fn display_order(a: &PriceEntry, b: &PriceEntry) -> Ordering {
    a.price
        .cmp(&b.price)
        .then_with(|| b.store.is_preferred.cmp(&a.store.is_preferred))
        .then_with(|| a.store.distance_km.total_cmp(&b.store.distance_km))
}

/// Entries in display order. Full ties keep their source order.
#[must_use]
pub fn rank_entries(entries: &[PriceEntry]) -> Vec<&PriceEntry> {
    let mut ranked: Vec<&PriceEntry> = entries.iter().collect();
    ranked.sort_by(|a, b| display_order(a, b));
    ranked
}

/// One row of a price comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparedEntry<'a> {
    /// The underlying entry.
    pub entry: &'a PriceEntry,
    /// Priced at the product's minimum.
    pub is_lowest: bool,
    /// Whole-percent discount off the regular price.
    pub discount_percent: Option<u32>,
    /// Absolute saving against the regular price.
    pub savings: Option<Price>,
    /// Discounted with an open sale window.
    pub on_sale: bool,
}

/// Comparison facts for one product across stores.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceComparison<'a> {
    /// Product being compared.
    pub product: &'a Product,
    /// Minimum price.
    pub lowest: Price,
    /// Maximum price.
    pub highest: Price,
    /// `highest - lowest`: the most a shopper saves by picking the cheapest store.
    pub spread: Price,
    /// Rows in display order.
    pub entries: Vec<ComparedEntry<'a>>,
}

impl<'a> PriceComparison<'a> {
    /// Rows flagged as lowest.
    pub fn lowest_entries(&self) -> impl Iterator<Item = &ComparedEntry<'a>> {
        self.entries.iter().filter(|row| row.is_lowest)
    }
}

/// Compare a product's prices across stores.
///
/// Returns `None` when the product has no price entries.
#[must_use]
pub fn compare(product: &Product, now: DateTime<Utc>) -> Option<PriceComparison<'_>> {
    let entries = product.prices.as_slice();
    let lowest = lowest_price(entries)?;
    let highest = highest_price(entries)?;
    let spread = Price::new(highest.amount() - lowest.amount()).unwrap_or(Price::ZERO);

    let rows = rank_entries(entries)
        .into_iter()
        .map(|entry| ComparedEntry {
            entry,
            is_lowest: entry.price == lowest,
            discount_percent: discount_percent(entry),
            savings: savings(entry),
            on_sale: is_on_sale(entry, now),
        })
        .collect();

    Some(PriceComparison {
        product,
        lowest,
        highest,
        spread,
        entries: rows,
    })
}
