//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// invariants, conflicts). Infrastructure concerns belong elsewhere.
///
/// Every variant carries which rule was violated, so callers can distinguish
/// "fix your input" from "this is no longer possible".
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Malformed or out-of-range input (empty line list, non-positive
    /// quantity, GST rate outside [0, 100], ...).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A requested record was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// The operation is not legal for the record's current status
    /// (e.g. receipt against a non-approved order, delete of a closed order).
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// A status change outside the allowed transition table.
    #[error("invalid transition: {0}")]
    InvalidTransition(String),

    /// Cumulative received quantity would exceed the ordered quantity.
    #[error("over-receipt: {0}")]
    OverReceipt(String),

    /// A concurrent-mutation race was lost; safe to re-fetch and retry.
    #[error("conflict: {0}")]
    Conflict(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }

    pub fn invalid_transition(msg: impl Into<String>) -> Self {
        Self::InvalidTransition(msg.into())
    }

    pub fn over_receipt(msg: impl Into<String>) -> Self {
        Self::OverReceipt(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }
}
