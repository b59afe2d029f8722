//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every ledger mutation failure is atomic: either the full
/// read-compute-write cycle succeeds or nothing changes. None of these
/// variants is fatal; retry policy belongs to the caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A field was missing or out of range (caller error, reject the single operation).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The part id is unknown.
    #[error("part not found")]
    NotFound,

    /// A movement would drive quantity below zero. No partial write occurs.
    #[error("insufficient stock: {0}")]
    InsufficientStock(String),

    /// A persistence collaborator failed. The operation had no effect; safe to retry.
    #[error("persistence failure: {0}")]
    Persistence(String),
}

impl DomainError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn insufficient_stock(msg: impl Into<String>) -> Self {
        Self::InsufficientStock(msg.into())
    }

    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::Persistence(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }
}
