use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use partkeep_core::PartId;

use super::{AttributeFields, ChangeListener, PartStore, StoreError};
use crate::part::{Part, StockLog};

/// In-memory part store.
///
/// Intended for tests/dev. Not optimized for performance.
#[derive(Default)]
pub struct InMemoryPartStore {
    parts: RwLock<HashMap<PartId, Part>>,
    listeners: RwLock<Vec<Arc<dyn ChangeListener>>>,
}

impl InMemoryPartStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Invoked after the write guard is released; a listener re-reading the
    /// store must not deadlock against the mutating thread.
    fn notify(&self) {
        if let Ok(listeners) = self.listeners.read() {
            for listener in listeners.iter() {
                listener.parts_changed();
            }
        }
    }
}

impl PartStore for InMemoryPartStore {
    fn load_all(&self) -> Result<Vec<Part>, StoreError> {
        let parts = self
            .parts
            .read()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;

        let mut all: Vec<Part> = parts.values().cloned().collect();
        // v7 ids are time-ordered, so this is creation order.
        all.sort_by_key(|part| part.id());
        Ok(all)
    }

    fn load(&self, id: PartId) -> Result<Option<Part>, StoreError> {
        let parts = self
            .parts
            .read()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;

        Ok(parts.get(&id).cloned())
    }

    fn insert(&self, part: &Part) -> Result<(), StoreError> {
        {
            let mut parts = self
                .parts
                .write()
                .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;

            if parts.contains_key(&part.id()) {
                return Err(StoreError::Backend(format!(
                    "duplicate part id: {}",
                    part.id()
                )));
            }
            parts.insert(part.id(), part.clone());
        }

        self.notify();
        Ok(())
    }

    fn save_attributes(&self, id: PartId, fields: &AttributeFields) -> Result<(), StoreError> {
        {
            let mut parts = self
                .parts
                .write()
                .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;

            let existing = parts.get(&id).ok_or(StoreError::NotFound)?;

            // Rebuild from the stored part so quantity/history stay untouched.
            let mut updated = existing.clone();
            updated
                .apply_patch(&crate::part::PartPatch {
                    name: Some(fields.name.clone()),
                    part_number: Some(fields.part_number.clone()),
                    description: Some(fields.description.clone()),
                    category: Some(fields.category.clone()),
                    supplier: Some(fields.supplier.clone()),
                    location: Some(fields.location.clone()),
                    min_stock: Some(fields.min_stock),
                    max_stock: Some(fields.max_stock),
                })
                .map_err(|e| StoreError::Backend(e.to_string()))?;
            parts.insert(id, updated);
        }

        self.notify();
        Ok(())
    }

    fn save_quantity_and_history(
        &self,
        id: PartId,
        quantity: i64,
        history: &[StockLog],
    ) -> Result<(), StoreError> {
        {
            let mut parts = self
                .parts
                .write()
                .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;

            let part = parts.get_mut(&id).ok_or(StoreError::NotFound)?;
            part.overwrite_stock_state(quantity, history.to_vec());
        }

        self.notify();
        Ok(())
    }

    fn subscribe(&self, listener: Arc<dyn ChangeListener>) {
        if let Ok(mut listeners) = self.listeners.write() {
            listeners.push(listener);
        }
    }
}
