//! Application state with explicit, validated mutation entry points.
//!
//! `AppState` is passed down to whatever presents it; there is no global
//! instance. Every command validates its input, writes through the
//! [`Repositories`], and only then changes the in-memory copy, so a failed
//! write leaves both sides as they were.
//!
//! Commands take `&mut self`, which makes the state single-writer. Hosts
//! that share it across threads wrap it in a lock; read-side computations
//! such as [`AppState::summary`] work on a borrowed snapshot of the list.

use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument, warn};

use crate::alerts::{self, AlertError};
use crate::estimator::{self, ListSummary};
use crate::models::{
    AlertNotification, Catalog, NewShoppingItem, PriceAlert, Product, ScanRecord, ShoppingItem,
    Store,
};
use crate::repository::{Repositories, RepositoryError};
use crate::shopping_list::{ShoppingList, ShoppingListError, normalize_item};
use crate::types::{Barcode, Price, PriceAlertId, ShoppingItemId, StoreId};

/// Location shown before the user picks one.
pub const DEFAULT_USER_LOCATION: &str = "Toronto, ON";

/// Default number of entries returned by [`AppState::recent_scans`].
pub const DEFAULT_RECENT_SCAN_LIMIT: usize = 10;

/// Errors returned by state commands.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    /// Shopping list validation failed.
    #[error("shopping list error: {0}")]
    ShoppingList(#[from] ShoppingListError),

    /// Repository read or write failed.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Alert operation failed.
    #[error("alert error: {0}")]
    Alert(#[from] AlertError),

    /// No alert with the given ID.
    #[error("price alert not found: {0}")]
    AlertNotFound(PriceAlertId),

    /// User location cannot be blank.
    #[error("user location cannot be empty")]
    EmptyLocation,
}

/// Everything the user owns, plus the repositories that persist it.
#[derive(Debug)]
pub struct AppState {
    repos: Repositories,
    shopping_list: ShoppingList,
    alerts: Vec<PriceAlert>,
    preferred_stores: Vec<Store>,
    scans: Vec<ScanRecord>,
    user_location: String,
}

impl AppState {
    /// Fresh state with nothing loaded.
    #[must_use]
    pub fn new(repos: Repositories) -> Self {
        Self {
            repos,
            shopping_list: ShoppingList::new(),
            alerts: Vec::new(),
            preferred_stores: Vec::new(),
            scans: Vec::new(),
            user_location: DEFAULT_USER_LOCATION.to_string(),
        }
    }

    /// Build state from what the repositories hold.
    ///
    /// Only stores flagged preferred are kept as preferred stores.
    ///
    /// # Errors
    ///
    /// Returns an error if a repository cannot be read or holds an invalid
    /// shopping list.
    #[instrument(skip(repos))]
    pub fn load(repos: Repositories) -> Result<Self, StateError> {
        let shopping_list = ShoppingList::from_items(repos.shopping_items.load()?)?;
        let preferred_stores = repos
            .stores
            .load()?
            .into_iter()
            .filter(|store| store.is_preferred)
            .collect::<Vec<_>>();
        let alerts = repos.alerts.load()?;
        let scans = repos.scans.load()?;

        info!(
            items = shopping_list.len(),
            stores = preferred_stores.len(),
            alerts = alerts.len(),
            scans = scans.len(),
            "Loaded application state"
        );

        Ok(Self {
            repos,
            shopping_list,
            alerts,
            preferred_stores,
            scans,
            user_location: DEFAULT_USER_LOCATION.to_string(),
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The shopping list.
    #[must_use]
    pub const fn shopping_list(&self) -> &ShoppingList {
        &self.shopping_list
    }

    /// Shopping list items, in order.
    #[must_use]
    pub fn items(&self) -> &[ShoppingItem] {
        self.shopping_list.items()
    }

    /// All price alerts, including fired and dismissed ones.
    #[must_use]
    pub fn alerts(&self) -> &[PriceAlert] {
        &self.alerts
    }

    /// Alerts still watching prices.
    pub fn active_alerts(&self) -> impl Iterator<Item = &PriceAlert> {
        self.alerts.iter().filter(|alert| alert.is_active())
    }

    /// Preferred stores, in the order they were added.
    #[must_use]
    pub fn preferred_stores(&self) -> &[Store] {
        &self.preferred_stores
    }

    /// The user's location label.
    #[must_use]
    pub fn user_location(&self) -> &str {
        &self.user_location
    }

    /// Summary of the current shopping list.
    #[must_use]
    pub fn summary(&self, default_unit_price: Price) -> ListSummary {
        estimator::summarize(self.items(), default_unit_price)
    }

    // =========================================================================
    // Shopping list commands
    // =========================================================================

    /// Add an item to the end of the shopping list.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is invalid or cannot be saved.
    #[instrument(skip(self, new), fields(name = %new.name, quantity = new.quantity))]
    pub fn add_item(&mut self, new: NewShoppingItem) -> Result<ShoppingItem, StateError> {
        let item = ShoppingList::prepare(new)?;
        self.repos.shopping_items.save(&item)?;
        let item = self.shopping_list.insert(item)?;
        debug!(id = %item.id, "Added shopping item");
        Ok(item)
    }

    /// Replace an item's fields, matched by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the item is invalid, unknown, or cannot be saved.
    #[instrument(skip(self, item), fields(id = %item.id))]
    pub fn update_item(&mut self, item: ShoppingItem) -> Result<(), StateError> {
        let item = normalize_item(item)?;
        if self.shopping_list.get(item.id).is_none() {
            return Err(ShoppingListError::ItemNotFound(item.id).into());
        }
        self.repos.shopping_items.save(&item)?;
        self.shopping_list.update(item)?;
        Ok(())
    }

    /// Remove an item from the list.
    ///
    /// # Errors
    ///
    /// Returns an error if the item is unknown or cannot be deleted.
    #[instrument(skip(self))]
    pub fn remove_item(&mut self, id: ShoppingItemId) -> Result<ShoppingItem, StateError> {
        if self.shopping_list.get(id).is_none() {
            return Err(ShoppingListError::ItemNotFound(id).into());
        }
        self.repos.shopping_items.delete(&id)?;
        Ok(self.shopping_list.remove(id)?)
    }

    /// Flip an item's checked state, returning the new state.
    ///
    /// # Errors
    ///
    /// Returns an error if the item is unknown or cannot be saved.
    #[instrument(skip(self))]
    pub fn toggle_item(&mut self, id: ShoppingItemId) -> Result<bool, StateError> {
        let mut item = self
            .shopping_list
            .get(id)
            .cloned()
            .ok_or(ShoppingListError::ItemNotFound(id))?;
        item.toggle();
        self.repos.shopping_items.save(&item)?;
        Ok(self.shopping_list.toggle(id)?)
    }

    // =========================================================================
    // Preferred stores
    // =========================================================================

    /// Mark a store as preferred.
    ///
    /// Returns `false` if it was already preferred (nothing changes).
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be saved.
    #[instrument(skip(self, store), fields(store = %store.name))]
    pub fn add_preferred_store(&mut self, store: &Store) -> Result<bool, StateError> {
        if self.preferred_stores.iter().any(|s| s.id == store.id) {
            return Ok(false);
        }
        let mut store = store.clone();
        store.is_preferred = true;
        self.repos.stores.save(&store)?;
        self.preferred_stores.push(store);
        Ok(true)
    }

    /// Unmark a preferred store. The store record is kept, flagged not preferred.
    ///
    /// Returns `false` if the store was not preferred.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be saved.
    #[instrument(skip(self))]
    pub fn remove_preferred_store(&mut self, id: StoreId) -> Result<bool, StateError> {
        let Some(index) = self.preferred_stores.iter().position(|s| s.id == id) else {
            return Ok(false);
        };
        let mut store = self.preferred_stores.remove(index);
        store.is_preferred = false;
        if let Err(e) = self.repos.stores.save(&store) {
            store.is_preferred = true;
            self.preferred_stores.insert(index, store);
            return Err(e.into());
        }
        Ok(true)
    }

    /// Whether a store is preferred.
    #[must_use]
    pub fn is_preferred(&self, id: StoreId) -> bool {
        self.preferred_stores.iter().any(|s| s.id == id)
    }

    /// Copy of `product` with each entry's store preference set from this state.
    ///
    /// Price data sources know nothing about the user's preferences; apply
    /// them before ranking entries for display.
    #[must_use]
    pub fn with_preferences(&self, product: &Product) -> Product {
        let mut product = product.clone();
        for entry in &mut product.prices {
            entry.store.is_preferred = self.is_preferred(entry.store.id);
        }
        product
    }

    // =========================================================================
    // Scan history
    // =========================================================================

    /// Record a barcode lookup and whether it matched a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be saved.
    #[instrument(skip(self, product))]
    pub fn record_scan(
        &mut self,
        barcode: Barcode,
        product: Option<&Product>,
        now: DateTime<Utc>,
    ) -> Result<ScanRecord, StateError> {
        let record = ScanRecord::new(barcode, product.map(|p| p.name.clone()), now);
        self.repos.scans.save(&record)?;
        self.scans.push(record.clone());
        Ok(record)
    }

    /// The most recent scans, newest first. Scans with the same timestamp
    /// come back in reverse recording order.
    #[must_use]
    pub fn recent_scans(&self, limit: usize) -> Vec<&ScanRecord> {
        let mut scans: Vec<&ScanRecord> = self.scans.iter().rev().collect();
        scans.sort_by(|a, b| b.scanned_at.cmp(&a.scanned_at));
        scans.truncate(limit);
        scans
    }

    // =========================================================================
    // Price alerts
    // =========================================================================

    /// Start watching a product for a target price.
    ///
    /// # Errors
    ///
    /// Returns an error if the alert cannot be saved.
    #[instrument(skip(self, product), fields(barcode = %product.barcode, target = %target_price))]
    pub fn add_alert(
        &mut self,
        product: &Product,
        target_price: Price,
        store_id: Option<StoreId>,
    ) -> Result<PriceAlert, StateError> {
        let alert = PriceAlert::new(product, target_price, store_id);
        self.repos.alerts.save(&alert)?;
        self.alerts.push(alert.clone());
        Ok(alert)
    }

    /// Cancel an active alert.
    ///
    /// # Errors
    ///
    /// Returns an error if the alert is unknown, inactive, or cannot be saved.
    #[instrument(skip(self))]
    pub fn dismiss_alert(&mut self, id: PriceAlertId) -> Result<(), StateError> {
        let alert = self
            .alerts
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(StateError::AlertNotFound(id))?;
        let mut updated = alert.clone();
        alerts::dismiss(&mut updated)?;
        self.repos.alerts.save(&updated)?;
        *alert = updated;
        Ok(())
    }

    /// Check every active alert against the catalog.
    ///
    /// Alerts whose product is missing from the catalog are skipped. Returns
    /// one notification per alert that fired; fired alerts become inactive.
    ///
    /// # Errors
    ///
    /// Returns an error if an updated alert cannot be saved. Alerts evaluated
    /// before the failure keep their new state.
    #[instrument(skip(self, catalog))]
    pub fn evaluate_alerts(
        &mut self,
        catalog: &Catalog,
        now: DateTime<Utc>,
    ) -> Result<Vec<AlertNotification>, StateError> {
        let mut notifications = Vec::new();

        for alert in self.alerts.iter_mut().filter(|a| a.is_active()) {
            let Some(product) = catalog.get(&alert.barcode) else {
                warn!(barcode = %alert.barcode, "No catalog entry for alert");
                continue;
            };

            let mut updated = alert.clone();
            let fired = alerts::evaluate(&mut updated, product, now)?;
            if updated != *alert {
                self.repos.alerts.save(&updated)?;
                *alert = updated;
            }
            if let Some(notification) = fired {
                info!(alert = %notification.alert_id, price = %notification.price, "Price alert fired");
                notifications.push(notification);
            }
        }

        Ok(notifications)
    }

    // =========================================================================
    // Location
    // =========================================================================

    /// Change the user's location label.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::EmptyLocation`] if the label is blank.
    pub fn set_user_location(&mut self, location: &str) -> Result<(), StateError> {
        let location = location.trim();
        if location.is_empty() {
            return Err(StateError::EmptyLocation);
        }
        location.clone_into(&mut self.user_location);
        Ok(())
    }
}
