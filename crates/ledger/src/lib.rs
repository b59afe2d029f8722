//! `partkeep-ledger` — the stock ledger engine.
//!
//! Owns the `Part` entity and its append-only `StockLog` history, the
//! persistence contract (`PartStore`), and the per-part serialization of
//! every quantity-affecting operation. Business rules are deterministic
//! domain logic (no IO); IO happens only through the injected store.

pub mod part;
pub mod service;
pub mod store;

pub use part::{MovementKind, Part, PartPatch, PartSpec, StockLog};
pub use service::{Ledger, OpnameOutcome};
pub use store::{
    AttributeFields, ChangeListener, InMemoryPartStore, PartStore, StoreError,
};
