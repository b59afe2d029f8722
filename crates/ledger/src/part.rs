use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use partkeep_core::{DomainError, DomainResult, PartId, ValueObject};

/// Movement kind of a ledger entry.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementKind {
    In,
    Out,
    Adjustment,
}

impl MovementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementKind::In => "in",
            MovementKind::Out => "out",
            MovementKind::Adjustment => "adjustment",
        }
    }
}

impl core::fmt::Display for MovementKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One immutable entry in a part's movement history.
///
/// Sign convention: `In` entries are positive, `Out` entries are negative
/// (the caller supplies the sign; the ledger does not re-derive it from the
/// kind), `Adjustment` entries carry whatever signed delta reconciles a
/// physical count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockLog {
    pub timestamp: DateTime<Utc>,
    pub quantity_change: i64,
    pub kind: MovementKind,
}

impl ValueObject for StockLog {}

/// Creation request for a new part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartSpec {
    pub name: String,
    pub part_number: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    pub supplier: String,
    pub location: String,
    #[serde(default)]
    pub quantity: i64,
    #[serde(default)]
    pub min_stock: i64,
    #[serde(default)]
    pub max_stock: i64,
}

impl PartSpec {
    fn validate(&self) -> DomainResult<()> {
        require_text("name", &self.name)?;
        require_text("part number", &self.part_number)?;
        require_text("category", &self.category)?;
        require_text("supplier", &self.supplier)?;
        require_text("location", &self.location)?;
        require_non_negative("quantity", self.quantity)?;
        require_non_negative("min stock", self.min_stock)?;
        require_non_negative("max stock", self.max_stock)?;
        Ok(())
    }
}

/// Partial update of a part's attributes.
///
/// Quantity and history are not representable here; stock only changes
/// through movements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartPatch {
    pub name: Option<String>,
    pub part_number: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub supplier: Option<String>,
    pub location: Option<String>,
    pub min_stock: Option<i64>,
    pub max_stock: Option<i64>,
}

impl PartPatch {
    fn validate(&self) -> DomainResult<()> {
        if let Some(name) = &self.name {
            require_text("name", name)?;
        }
        if let Some(part_number) = &self.part_number {
            require_text("part number", part_number)?;
        }
        if let Some(category) = &self.category {
            require_text("category", category)?;
        }
        if let Some(supplier) = &self.supplier {
            require_text("supplier", supplier)?;
        }
        if let Some(location) = &self.location {
            require_text("location", location)?;
        }
        if let Some(min_stock) = self.min_stock {
            require_non_negative("min stock", min_stock)?;
        }
        if let Some(max_stock) = self.max_stock {
            require_non_negative("max stock", max_stock)?;
        }
        Ok(())
    }
}

fn require_text(field: &str, value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::invalid_input(format!("{field} cannot be empty")));
    }
    Ok(())
}

fn require_non_negative(field: &str, value: i64) -> DomainResult<()> {
    if value < 0 {
        return Err(DomainError::invalid_input(format!("{field} cannot be negative")));
    }
    Ok(())
}

/// An inventory part: current quantity plus its append-only movement history.
///
/// Invariant: `quantity` always equals the creation quantity plus the sum of
/// all `quantity_change` values in `stock_history`, in application order.
/// `max_stock == 0` means "no ceiling".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    id: PartId,
    name: String,
    part_number: String,
    description: String,
    category: String,
    supplier: String,
    location: String,
    quantity: i64,
    min_stock: i64,
    max_stock: i64,
    stock_history: Vec<StockLog>,
}

impl Part {
    /// Validate `spec` and create a new part with an empty history.
    pub fn create(id: PartId, spec: PartSpec) -> DomainResult<Self> {
        spec.validate()?;
        Ok(Self {
            id,
            name: spec.name,
            part_number: spec.part_number,
            description: spec.description,
            category: spec.category,
            supplier: spec.supplier,
            location: spec.location,
            quantity: spec.quantity,
            min_stock: spec.min_stock,
            max_stock: spec.max_stock,
            stock_history: Vec::new(),
        })
    }

    pub fn id(&self) -> PartId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn part_number(&self) -> &str {
        &self.part_number
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn supplier(&self) -> &str {
        &self.supplier
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn min_stock(&self) -> i64 {
        self.min_stock
    }

    pub fn max_stock(&self) -> i64 {
        self.max_stock
    }

    pub fn stock_history(&self) -> &[StockLog] {
        &self.stock_history
    }

    /// Net quantity change over the whole history.
    pub fn history_delta(&self) -> i64 {
        self.stock_history.iter().map(|log| log.quantity_change).sum()
    }

    /// Apply a quantity-changing movement.
    ///
    /// Appends a history entry and updates the quantity together; on error
    /// nothing changes. A zero delta is rejected: it represents no real
    /// event and must not enter the history.
    pub fn apply_movement(
        &mut self,
        quantity_change: i64,
        kind: MovementKind,
        timestamp: DateTime<Utc>,
    ) -> DomainResult<()> {
        if quantity_change == 0 {
            return Err(DomainError::invalid_input("quantity change cannot be zero"));
        }

        let new_quantity = self.quantity + quantity_change;
        if new_quantity < 0 {
            return Err(DomainError::insufficient_stock(format!(
                "change of {quantity_change} would drive quantity below zero (current: {})",
                self.quantity
            )));
        }

        self.stock_history.push(StockLog {
            timestamp,
            quantity_change,
            kind,
        });
        self.quantity = new_quantity;
        Ok(())
    }

    /// Replace quantity and history wholesale. Persistence path only; every
    /// ledger mutation goes through `apply_movement`.
    pub(crate) fn overwrite_stock_state(&mut self, quantity: i64, history: Vec<StockLog>) {
        self.quantity = quantity;
        self.stock_history = history;
    }

    /// Apply an attribute patch. Validates before mutating, so a rejected
    /// patch leaves the part untouched.
    pub fn apply_patch(&mut self, patch: &PartPatch) -> DomainResult<()> {
        patch.validate()?;

        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(part_number) = &patch.part_number {
            self.part_number = part_number.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(category) = &patch.category {
            self.category = category.clone();
        }
        if let Some(supplier) = &patch.supplier {
            self.supplier = supplier.clone();
        }
        if let Some(location) = &patch.location {
            self.location = location.clone();
        }
        if let Some(min_stock) = patch.min_stock {
            self.min_stock = min_stock;
        }
        if let Some(max_stock) = patch.max_stock {
            self.max_stock = max_stock;
        }
        Ok(())
    }
}
