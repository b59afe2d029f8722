//! `partkeep-exchange` — import/export contracts.
//!
//! The core's boundary with file-based interchange: decoding loose records
//! into part-creation requests, and shaping flat rows for an external
//! CSV/XLSX encoder. No file formats live here.

pub mod export;
pub mod import;

pub use export::{history_rows, part_rows, status_rows, HistoryRow, PartRow, StatusRow};
pub use import::{import_parts, ImportRecord, ImportSummary, DEFAULT_CATEGORY};
