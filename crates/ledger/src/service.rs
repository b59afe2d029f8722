//! Ledger engine: orchestration and per-part serialization.
//!
//! Every mutation follows the same cycle:
//!
//! ```text
//! acquire the part's lock
//!   ↓
//! load current state from the store
//!   ↓
//! validate + compute (pure domain logic on `Part`)
//!   ↓
//! persist quantity/history or attributes
//!   ↓
//! release the lock (RAII, on all exit paths)
//! ```
//!
//! One exclusive lock exists per part id, so two concurrent mutations on the
//! same part serialize while mutations on different parts proceed fully in
//! parallel. There is no cross-part transaction, so no lock-ordering concern
//! arises. Reads (`load_parts`) take no per-part lock: a report may
//! interleave with mutations and observes per-part consistency only, like a
//! live dashboard.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};

use partkeep_core::{DomainError, DomainResult, PartId};

use crate::part::{MovementKind, Part, PartPatch, PartSpec};
use crate::store::{AttributeFields, PartStore};

/// Outcome of a stock opname (physical-count reconciliation).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpnameOutcome {
    /// The counted quantity differed; an adjustment movement was applied.
    Adjusted(Part),
    /// The counted quantity matched the system quantity. Nothing was
    /// written: no history entry, no quantity change.
    NoChange,
}

/// The ledger engine.
///
/// Owns the store handle and the per-part lock registry. Locks are created
/// lazily on first use and kept for the life of the engine.
pub struct Ledger<S: PartStore> {
    store: S,
    locks: Mutex<HashMap<PartId, Arc<Mutex<()>>>>,
}

impl<S: PartStore> Ledger<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn part_lock(&self, id: PartId) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
        locks.entry(id).or_default().clone()
    }

    fn load_required(&self, id: PartId) -> DomainResult<Part> {
        Ok(self.store.load(id)?.ok_or(DomainError::NotFound)?)
    }

    /// Create a new part with an empty history and a freshly assigned id.
    ///
    /// Fails only on validation (`InvalidInput`) or persistence errors.
    pub fn create_part(&self, spec: PartSpec) -> DomainResult<Part> {
        let part = Part::create(PartId::new(), spec)?;
        self.store.insert(&part)?;
        tracing::info!(part_id = %part.id(), name = part.name(), "part created");
        Ok(part)
    }

    /// Update any subset of a part's non-quantity attributes.
    ///
    /// The patch type cannot express quantity or history, so stale values
    /// for either cannot leak through this operation.
    pub fn update_attributes(&self, id: PartId, patch: PartPatch) -> DomainResult<Part> {
        let lock = self.part_lock(id);
        let _guard = lock.lock().unwrap_or_else(|e| e.into_inner());

        let mut part = self.load_required(id)?;
        part.apply_patch(&patch)?;
        self.store
            .save_attributes(id, &AttributeFields::from_part(&part))?;
        tracing::info!(part_id = %id, "part attributes updated");
        Ok(part)
    }

    /// Apply a stock movement to a part.
    ///
    /// Appends a `StockLog` and updates the quantity atomically with respect
    /// to other mutations on the same part. On failure nothing is written.
    pub fn apply_movement(
        &self,
        id: PartId,
        quantity_change: i64,
        kind: MovementKind,
        timestamp: DateTime<Utc>,
    ) -> DomainResult<Part> {
        let lock = self.part_lock(id);
        let _guard = lock.lock().unwrap_or_else(|e| e.into_inner());

        self.apply_movement_locked(id, quantity_change, kind, timestamp)
    }

    /// Reconcile a physical count against the system quantity.
    ///
    /// A zero delta is an explicit, observable no-op: not an error, and not
    /// an empty adjustment entry.
    pub fn apply_stock_opname(
        &self,
        id: PartId,
        counted_quantity: i64,
        timestamp: DateTime<Utc>,
    ) -> DomainResult<OpnameOutcome> {
        if counted_quantity < 0 {
            return Err(DomainError::invalid_input(
                "counted quantity cannot be negative",
            ));
        }

        let lock = self.part_lock(id);
        let _guard = lock.lock().unwrap_or_else(|e| e.into_inner());

        let part = self.load_required(id)?;
        let delta = counted_quantity - part.quantity();
        if delta == 0 {
            tracing::info!(part_id = %id, counted_quantity, "stock opname: no change");
            return Ok(OpnameOutcome::NoChange);
        }

        let updated =
            self.apply_movement_locked(id, delta, MovementKind::Adjustment, timestamp)?;
        Ok(OpnameOutcome::Adjusted(updated))
    }

    /// Snapshot of all parts, for report generation and catalog views.
    pub fn load_parts(&self) -> DomainResult<Vec<Part>> {
        Ok(self.store.load_all()?)
    }

    pub fn load_part(&self, id: PartId) -> DomainResult<Part> {
        self.load_required(id)
    }

    /// Caller must already hold the part's lock.
    fn apply_movement_locked(
        &self,
        id: PartId,
        quantity_change: i64,
        kind: MovementKind,
        timestamp: DateTime<Utc>,
    ) -> DomainResult<Part> {
        let mut part = self.load_required(id)?;

        if let Err(err) = part.apply_movement(quantity_change, kind, timestamp) {
            tracing::warn!(part_id = %id, quantity_change, %kind, %err, "stock movement rejected");
            return Err(err);
        }

        self.store
            .save_quantity_and_history(id, part.quantity(), part.stock_history())?;
        tracing::info!(
            part_id = %id,
            quantity = part.quantity(),
            quantity_change,
            %kind,
            "stock movement applied"
        );
        Ok(part)
    }
}
