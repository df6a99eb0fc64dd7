//! `reconerp-numbering` — idempotent document number generation.
//!
//! Documents are created by independent, possibly concurrent derivation
//! calls, so there is no global sequence: every document type uses the
//! same candidate-check-retry pattern against a number registry, with a
//! small fixed retry bound.

pub mod generator;
pub mod store;

pub use generator::{DocumentNumber, NumberGenerator};
pub use store::{InMemoryNumberStore, NumberStore};
