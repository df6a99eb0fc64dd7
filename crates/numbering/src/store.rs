//! Number registry collaborator.

use std::collections::HashSet;
use std::sync::{Arc, RwLock};

use reconerp_core::{DomainError, DomainResult};

/// Registry of document numbers already in use.
///
/// `try_reserve` must be atomic: when two callers race on the same
/// candidate, exactly one sees `true`.
pub trait NumberStore: Send + Sync {
    /// Reserve `number` if it is not already taken. Returns `false` on
    /// collision.
    fn try_reserve(&self, number: &str) -> DomainResult<bool>;
}

impl<S> NumberStore for Arc<S>
where
    S: NumberStore + ?Sized,
{
    fn try_reserve(&self, number: &str) -> DomainResult<bool> {
        (**self).try_reserve(number)
    }
}

/// In-memory number registry.
///
/// Intended for tests/dev. Reservation is a single write-locked insert,
/// so concurrent generation yields distinct numbers.
#[derive(Debug, Default)]
pub struct InMemoryNumberStore {
    reserved: RwLock<HashSet<String>>,
}

impl InMemoryNumberStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-mark a number as taken (test setup for collision paths).
    pub fn mark_taken(&self, number: impl Into<String>) {
        if let Ok(mut reserved) = self.reserved.write() {
            reserved.insert(number.into());
        }
    }
}

impl NumberStore for InMemoryNumberStore {
    fn try_reserve(&self, number: &str) -> DomainResult<bool> {
        let mut reserved = self
            .reserved
            .write()
            .map_err(|_| DomainError::transient("number registry lock poisoned"))?;
        Ok(reserved.insert(number.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserve_succeeds_once_per_number() {
        let store = InMemoryNumberStore::new();
        assert!(store.try_reserve("INV-1").unwrap());
        assert!(!store.try_reserve("INV-1").unwrap());
        assert!(store.try_reserve("INV-2").unwrap());
    }

    #[test]
    fn pre_marked_numbers_collide() {
        let store = InMemoryNumberStore::new();
        store.mark_taken("LPO-42");
        assert!(!store.try_reserve("LPO-42").unwrap());
    }
}
