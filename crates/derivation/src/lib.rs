//! `reconerp-derivation` — the document derivation orchestrator.
//!
//! Derives a new commercial document (an invoice or a supplier purchase
//! order) from one or more upstream documents without double-counting
//! quantities or money across partial, out-of-order fulfillment events.
//!
//! Data flow per line: fulfillment ledger → pricing resolver → line
//! computation → assembled [`DerivedDocument`], persisted atomically via
//! the storage collaborators.

pub mod document;
pub mod memory;
pub mod orchestrator;
pub mod storage;
pub mod warnings;

pub use document::{
    DerivedDocument, DerivedDocumentType, DerivedLine, DerivedStatus, DocumentTotals,
    FoldedTotals,
};
pub use memory::{InMemoryDerivedStore, InMemoryItemMaster, InMemorySourceStore};
pub use orchestrator::{DerivationEngine, DerivationOutcome, DerivationRequest, GroupBy};
pub use storage::{DerivedDocumentStore, ItemMaster, PersistFailure, SourceStore};
pub use warnings::DataQualityWarning;
