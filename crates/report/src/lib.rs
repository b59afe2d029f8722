//! `partkeep-report` — derived views over a parts snapshot.
//!
//! Reports and classifications are pure functions of the caller-supplied
//! snapshot; nothing here mutates or persists. Generation may run
//! concurrently with ledger mutations and observes per-part consistency
//! only.

pub mod report;
pub mod status;

pub use report::{generate_report, ReportRow};
pub use status::{classify, quantity_to_order, StockStatus};
