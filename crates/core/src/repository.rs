//! Persistence seam for user-owned entities.
//!
//! The core never talks to a storage engine directly. Hosts plug in an
//! implementation of [`Repository`] per entity type; [`InMemoryRepository`]
//! is the reference implementation and what the tests use.
//!
//! # Entities
//!
//! - [`ShoppingItem`] - shopping list rows
//! - [`Store`] - preferred stores
//! - [`PriceAlert`] - target price alerts
//! - [`ScanRecord`] - barcode scan history

use core::fmt::{Debug, Display};
use core::hash::Hash;

use crate::models::{PriceAlert, ScanRecord, ShoppingItem, Store};
use crate::types::{PriceAlertId, ScanRecordId, ShoppingItemId, StoreId};

/// Errors that can occur during repository operations.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// The storage backend failed.
    #[error("storage error: {0}")]
    Backend(String),

    /// Stored data could not be decoded.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found: {0}")]
    NotFound(String),
}

/// Something with a stable identity that a repository can store.
pub trait Entity: Clone {
    /// Identifier type.
    type Id: Copy + Eq + Hash + Debug + Display;

    /// The entity's stable ID.
    fn id(&self) -> Self::Id;
}

impl Entity for ShoppingItem {
    type Id = ShoppingItemId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

impl Entity for Store {
    type Id = StoreId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

impl Entity for PriceAlert {
    type Id = PriceAlertId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

impl Entity for ScanRecord {
    type Id = ScanRecordId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// Storage for one entity type.
pub trait Repository<E: Entity>: Send + Sync {
    /// Load every stored entity, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn load(&self) -> Result<Vec<E>, RepositoryError>;

    /// Insert or replace an entity, matched by ID.
    ///
    /// Replacing keeps the entity's original position.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn save(&mut self, entity: &E) -> Result<(), RepositoryError>;

    /// Delete an entity by ID.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] if nothing has that ID.
    fn delete(&mut self, id: &E::Id) -> Result<(), RepositoryError>;
}

/// Repository backed by a `Vec`, preserving insertion order.
#[derive(Debug, Clone)]
pub struct InMemoryRepository<E> {
    entities: Vec<E>,
}

impl<E> Default for InMemoryRepository<E> {
    fn default() -> Self {
        Self {
            entities: Vec::new(),
        }
    }
}

impl<E: Entity> InMemoryRepository<E> {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository pre-filled with entities.
    #[must_use]
    pub const fn with_entities(entities: Vec<E>) -> Self {
        Self { entities }
    }

    /// Number of stored entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the repository is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl<E: Entity + Send + Sync> Repository<E> for InMemoryRepository<E> {
    fn load(&self) -> Result<Vec<E>, RepositoryError> {
        Ok(self.entities.clone())
    }

    fn save(&mut self, entity: &E) -> Result<(), RepositoryError> {
        let id = entity.id();
        match self.entities.iter_mut().find(|e| e.id() == id) {
            Some(existing) => *existing = entity.clone(),
            None => self.entities.push(entity.clone()),
        }
        Ok(())
    }

    fn delete(&mut self, id: &E::Id) -> Result<(), RepositoryError> {
        let before = self.entities.len();
        self.entities.retain(|e| e.id() != *id);
        if self.entities.len() == before {
            return Err(RepositoryError::NotFound(id.to_string()));
        }
        Ok(())
    }
}

/// One repository per entity type the application state persists.
pub struct Repositories {
    /// Shopping list rows.
    pub shopping_items: Box<dyn Repository<ShoppingItem>>,
    /// Preferred stores.
    pub stores: Box<dyn Repository<Store>>,
    /// Price alerts.
    pub alerts: Box<dyn Repository<PriceAlert>>,
    /// Scan history.
    pub scans: Box<dyn Repository<ScanRecord>>,
}

impl Repositories {
    /// Empty in-memory repositories.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            shopping_items: Box::new(InMemoryRepository::<ShoppingItem>::new()),
            stores: Box::new(InMemoryRepository::<Store>::new()),
            alerts: Box::new(InMemoryRepository::<PriceAlert>::new()),
            scans: Box::new(InMemoryRepository::<ScanRecord>::new()),
        }
    }
}

impl Debug for Repositories {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Repositories").finish_non_exhaustive()
    }
}
