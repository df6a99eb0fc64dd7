//! Bounded-retry number generator.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use reconerp_core::{DomainError, DomainResult};

use crate::store::NumberStore;

/// A unique, human-readable document number (e.g. `INV-1767225600123`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentNumber(String);

impl DocumentNumber {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for DocumentNumber {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Generates unique numbers by candidate-check-retry against a registry.
#[derive(Debug)]
pub struct NumberGenerator<S> {
    store: S,
    max_attempts: u32,
}

impl<S: NumberStore> NumberGenerator<S> {
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;

    pub fn new(store: S) -> Self {
        Self { store, max_attempts: Self::DEFAULT_MAX_ATTEMPTS }
    }

    pub fn with_max_attempts(store: S, max_attempts: u32) -> Self {
        Self { store, max_attempts }
    }

    /// Produce a unique number for `prefix`.
    ///
    /// The candidate suffix is time-derived and salted with the attempt
    /// index, so retries within the same millisecond still move forward.
    /// Exhausting the retry budget yields [`DomainError::NumberExhausted`].
    pub fn generate(&self, prefix: &str) -> DomainResult<DocumentNumber> {
        for attempt in 0..self.max_attempts {
            let candidate = Self::candidate(prefix, attempt);
            if self.store.try_reserve(&candidate)? {
                return Ok(DocumentNumber(candidate));
            }
            tracing::warn!(
                prefix,
                candidate,
                attempt,
                "document number collision, retrying"
            );
        }

        Err(DomainError::NumberExhausted {
            prefix: prefix.to_string(),
            attempts: self.max_attempts,
        })
    }

    fn candidate(prefix: &str, attempt: u32) -> String {
        let suffix = Utc::now().timestamp_millis() + i64::from(attempt);
        format!("{prefix}-{suffix}")
    }
}
