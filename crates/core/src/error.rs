//! Domain error model.

use thiserror::Error;

/// Result type used across the derivation engine.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Line-level problems (unpriced lines, missing items, clamped quantities)
/// are not errors: they degrade to warnings so a usable document can still
/// be produced from imperfect upstream data. This enum covers the failures
/// that abort a derivation call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A derivation request failed validation (e.g. no processable lines,
    /// zero-value document after recovery).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A mandatory cross-reference is absent or unresolvable (e.g. a
    /// delivery with no linked order).
    #[error("missing mandatory reference: {0}")]
    MissingReference(String),

    /// A persistence failure that is retried automatically; surfaced only
    /// once the retry budget is exhausted.
    #[error("transient persistence failure: {0}")]
    TransientPersistence(String),

    /// A persistence failure that cannot be retried (mandatory foreign key
    /// violation). The atomic persist contract guarantees no partial
    /// document remains.
    #[error("persistence failure: {0}")]
    FatalPersistence(String),

    /// The number generator ran out of retry attempts for a prefix.
    #[error("number generation exhausted for prefix '{prefix}' after {attempts} attempts")]
    NumberExhausted { prefix: String, attempts: u32 },

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn missing_reference(msg: impl Into<String>) -> Self {
        Self::MissingReference(msg.into())
    }

    pub fn transient(msg: impl Into<String>) -> Self {
        Self::TransientPersistence(msg.into())
    }

    pub fn fatal(msg: impl Into<String>) -> Self {
        Self::FatalPersistence(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}
