//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**; two instances
/// with the same attributes are interchangeable. A ledger entry is the
/// canonical example here: once constructed it is never modified, only
/// appended to a part's history.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
