//! Import contract: loosely-typed tabular rows decoded into part-creation
//! requests.
//!
//! The file decoding itself (CSV/XLSX) is a collaborator concern; this
//! module starts from already-decoded records.

use serde::Deserialize;

use partkeep_core::{DomainError, DomainResult};
use partkeep_ledger::{Ledger, PartSpec, PartStore};

/// Fallback category for rows that carry none.
pub const DEFAULT_CATEGORY: &str = "Uncategorized";

/// One imported row. Every field is optional text; numeric fields are
/// coerced with a zero default on parse failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImportRecord {
    pub name: String,
    pub part_number: String,
    pub description: String,
    pub category: String,
    pub supplier: String,
    pub location: String,
    pub quantity: String,
    pub min_stock: String,
    pub max_stock: String,
}

impl ImportRecord {
    /// Decode into a part-creation request. A blank category falls back to
    /// [`DEFAULT_CATEGORY`]; validation of the result stays with the ledger.
    pub fn into_spec(self) -> PartSpec {
        let category = if self.category.trim().is_empty() {
            DEFAULT_CATEGORY.to_string()
        } else {
            self.category
        };

        PartSpec {
            name: self.name,
            part_number: self.part_number,
            description: self.description,
            category,
            supplier: self.supplier,
            location: self.location,
            quantity: coerce_int(&self.quantity),
            min_stock: coerce_int(&self.min_stock),
            max_stock: coerce_int(&self.max_stock),
        }
    }
}

fn coerce_int(raw: &str) -> i64 {
    raw.trim().parse().unwrap_or(0)
}

/// Outcome of a batch import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped: usize,
}

/// Import a batch of records, one `create_part` per valid row.
///
/// Rows are processed independently: a row failing validation is skipped
/// and counted, never fatal to the batch. A persistence failure aborts the
/// batch early and is surfaced distinctly from per-row skips.
pub fn import_parts<S: PartStore>(
    ledger: &Ledger<S>,
    records: impl IntoIterator<Item = ImportRecord>,
) -> DomainResult<ImportSummary> {
    let mut summary = ImportSummary::default();

    for record in records {
        match ledger.create_part(record.into_spec()) {
            Ok(_) => summary.imported += 1,
            Err(DomainError::InvalidInput(reason)) => {
                tracing::warn!(%reason, "skipping malformed import row");
                summary.skipped += 1;
            }
            Err(err) => return Err(err),
        }
    }

    tracing::info!(
        imported = summary.imported,
        skipped = summary.skipped,
        "import batch finished"
    );
    Ok(summary)
}
