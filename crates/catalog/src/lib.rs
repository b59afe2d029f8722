//! `partkeep-catalog` — queryable read-side view over the part set.
//!
//! Facet enumeration, text search and combined filtering. Everything here is
//! recomputed from the current part snapshot; no independent state, no
//! reconciliation.

pub mod index;

pub use index::{CatalogIndex, CatalogProjection, PartFilter, ALL};
