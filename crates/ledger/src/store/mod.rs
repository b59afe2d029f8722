//! Persistence boundary for parts.
//!
//! The ledger does not dictate how parts are persisted (document store,
//! relational table, flat file); collaborators implement `PartStore` against
//! whatever backing store they use. Quantity and history are always written
//! together through `save_quantity_and_history`, and never through
//! `save_attributes`.

pub mod in_memory;

pub use in_memory::InMemoryPartStore;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use partkeep_core::{DomainError, PartId};

use crate::part::{Part, StockLog};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backing store failed or rejected the operation.
    #[error("store backend failure: {0}")]
    Backend(String),

    /// The id does not exist in the store.
    #[error("part not found in store")]
    NotFound,
}

impl From<StoreError> for DomainError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::NotFound => DomainError::NotFound,
            StoreError::Backend(msg) => DomainError::persistence(msg),
        }
    }
}

/// The attribute subset persisted by `save_attributes`.
///
/// Quantity and history are absent, so a store implementation cannot
/// persist stale stock state through the attribute path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeFields {
    pub name: String,
    pub part_number: String,
    pub description: String,
    pub category: String,
    pub supplier: String,
    pub location: String,
    pub min_stock: i64,
    pub max_stock: i64,
}

impl AttributeFields {
    pub fn from_part(part: &Part) -> Self {
        Self {
            name: part.name().to_string(),
            part_number: part.part_number().to_string(),
            description: part.description().to_string(),
            category: part.category().to_string(),
            supplier: part.supplier().to_string(),
            location: part.location().to_string(),
            min_stock: part.min_stock(),
            max_stock: part.max_stock(),
        }
    }
}

/// Notified after each successful write.
///
/// This is the pull-based reframing of a live collection subscription: the
/// store tells listeners *that* something changed, and they re-read whatever
/// snapshot they need via `load_all`. Listeners must tolerate spurious
/// notifications.
pub trait ChangeListener: Send + Sync {
    fn parts_changed(&self);
}

/// Load/save contract consumed by the ledger engine.
pub trait PartStore: Send + Sync {
    fn load_all(&self) -> Result<Vec<Part>, StoreError>;

    fn load(&self, id: PartId) -> Result<Option<Part>, StoreError>;

    fn insert(&self, part: &Part) -> Result<(), StoreError>;

    /// Persist the non-quantity attributes of an existing part.
    fn save_attributes(&self, id: PartId, fields: &AttributeFields) -> Result<(), StoreError>;

    /// Persist quantity and history together (never one without the other).
    fn save_quantity_and_history(
        &self,
        id: PartId,
        quantity: i64,
        history: &[StockLog],
    ) -> Result<(), StoreError>;

    /// Register a change hook. Stores without a notification mechanism may
    /// keep the default no-op.
    fn subscribe(&self, _listener: Arc<dyn ChangeListener>) {}
}

impl<S: PartStore + ?Sized> PartStore for Arc<S> {
    fn load_all(&self) -> Result<Vec<Part>, StoreError> {
        (**self).load_all()
    }

    fn load(&self, id: PartId) -> Result<Option<Part>, StoreError> {
        (**self).load(id)
    }

    fn insert(&self, part: &Part) -> Result<(), StoreError> {
        (**self).insert(part)
    }

    fn save_attributes(&self, id: PartId, fields: &AttributeFields) -> Result<(), StoreError> {
        (**self).save_attributes(id, fields)
    }

    fn save_quantity_and_history(
        &self,
        id: PartId,
        quantity: i64,
        history: &[StockLog],
    ) -> Result<(), StoreError> {
        (**self).save_quantity_and_history(id, quantity, history)
    }

    fn subscribe(&self, listener: Arc<dyn ChangeListener>) {
        (**self).subscribe(listener)
    }
}
