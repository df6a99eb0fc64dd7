//! `reconerp-core` — engine foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure
//! concerns): the error taxonomy, strongly-typed identifiers, monetary
//! value objects, and cross-document references.

pub mod error;
pub mod id;
pub mod money;
pub mod refs;

pub use error::{DomainError, DomainResult};
pub use id::{
    CustomerId, DeliveryId, DeliveryLineId, InvoiceId, InvoiceLineId, ItemId, OrderId,
    OrderLineId, PurchaseOrderId, PurchaseOrderLineId, QuoteId, QuoteLineId, SupplierId, UserId,
};
pub use money::{Money, Percent, round_unit_cost};
pub use refs::{DocumentKind, DocumentRef};
