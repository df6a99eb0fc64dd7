//! Storage collaborator contracts.
//!
//! The engine never talks to a database directly: upstream documents are
//! read through [`SourceStore`], item master data through [`ItemMaster`],
//! and the derived output is handed to [`DerivedDocumentStore`] for
//! atomic persistence. Implementations may be in-memory (tests/dev, see
//! [`crate::memory`]) or backed by the application's storage layer.

use std::sync::Arc;

use thiserror::Error;

use reconerp_core::{DeliveryId, DomainResult, ItemId, OrderId, OrderLineId, PurchaseOrderId, QuoteId};
use reconerp_documents::{
    Delivery, DeliveryLine, Item, OrderLine, PurchaseOrder, PurchaseOrderLine, QuoteLine,
    Quotation, SalesOrder,
};
use reconerp_ledger::FulfillmentEvent;

use crate::document::DerivedDocument;

/// A persistence failure, classified so the orchestrator can decide
/// between retry and abort.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PersistFailure {
    /// An optional audit foreign key (created-by) was rejected. Retried
    /// once with the reference cleared.
    #[error("audit reference rejected: {0}")]
    AuditReference(String),

    /// The document number collided with an existing one.
    #[error("document number already in use: {0}")]
    UniqueNumber(String),

    /// A mandatory foreign key (customer, supplier, source document) was
    /// rejected. Never retried.
    #[error("mandatory reference violation: {0}")]
    MandatoryReference(String),

    /// Any other storage failure, timeouts included.
    #[error("storage failure: {0}")]
    Io(String),
}

/// Read-only access to upstream documents and fulfillment history.
pub trait SourceStore: Send + Sync {
    fn sales_order(&self, id: OrderId) -> DomainResult<Option<SalesOrder>>;
    fn order_lines(&self, order_id: OrderId) -> DomainResult<Vec<OrderLine>>;
    fn quotation(&self, id: QuoteId) -> DomainResult<Option<Quotation>>;
    fn quote_lines(&self, quote_id: QuoteId) -> DomainResult<Vec<QuoteLine>>;
    fn delivery(&self, id: DeliveryId) -> DomainResult<Option<Delivery>>;
    fn delivery_lines(&self, delivery_id: DeliveryId) -> DomainResult<Vec<DeliveryLine>>;
    fn purchase_order(&self, id: PurchaseOrderId) -> DomainResult<Option<PurchaseOrder>>;
    fn purchase_order_lines(&self, id: PurchaseOrderId) -> DomainResult<Vec<PurchaseOrderLine>>;

    /// Complete fulfillment history for one order line, across all
    /// deliveries and invoices. Recomputed fresh per derivation call.
    fn fulfillment_events(&self, order_line_id: OrderLineId) -> DomainResult<Vec<FulfillmentEvent>>;
}

/// Item master collaborator.
pub trait ItemMaster: Send + Sync {
    fn find(&self, id: ItemId) -> DomainResult<Option<Item>>;

    /// Mint a minimal placeholder item (auto-generated codes) so a line
    /// with a missing or dangling item reference is not dropped.
    fn create_placeholder(&self, description: &str) -> DomainResult<Item>;
}

/// Sink for derived documents.
///
/// `persist` must be atomic: either the header and every line are
/// persisted, or nothing is observable afterwards.
pub trait DerivedDocumentStore: Send + Sync {
    fn persist(&self, document: &DerivedDocument) -> Result<(), PersistFailure>;
}

impl<S> SourceStore for Arc<S>
where
    S: SourceStore + ?Sized,
{
    fn sales_order(&self, id: OrderId) -> DomainResult<Option<SalesOrder>> {
        (**self).sales_order(id)
    }

    fn order_lines(&self, order_id: OrderId) -> DomainResult<Vec<OrderLine>> {
        (**self).order_lines(order_id)
    }

    fn quotation(&self, id: QuoteId) -> DomainResult<Option<Quotation>> {
        (**self).quotation(id)
    }

    fn quote_lines(&self, quote_id: QuoteId) -> DomainResult<Vec<QuoteLine>> {
        (**self).quote_lines(quote_id)
    }

    fn delivery(&self, id: DeliveryId) -> DomainResult<Option<Delivery>> {
        (**self).delivery(id)
    }

    fn delivery_lines(&self, delivery_id: DeliveryId) -> DomainResult<Vec<DeliveryLine>> {
        (**self).delivery_lines(delivery_id)
    }

    fn purchase_order(&self, id: PurchaseOrderId) -> DomainResult<Option<PurchaseOrder>> {
        (**self).purchase_order(id)
    }

    fn purchase_order_lines(&self, id: PurchaseOrderId) -> DomainResult<Vec<PurchaseOrderLine>> {
        (**self).purchase_order_lines(id)
    }

    fn fulfillment_events(&self, order_line_id: OrderLineId) -> DomainResult<Vec<FulfillmentEvent>> {
        (**self).fulfillment_events(order_line_id)
    }
}

impl<M> ItemMaster for Arc<M>
where
    M: ItemMaster + ?Sized,
{
    fn find(&self, id: ItemId) -> DomainResult<Option<Item>> {
        (**self).find(id)
    }

    fn create_placeholder(&self, description: &str) -> DomainResult<Item> {
        (**self).create_placeholder(description)
    }
}

impl<D> DerivedDocumentStore for Arc<D>
where
    D: DerivedDocumentStore + ?Sized,
{
    fn persist(&self, document: &DerivedDocument) -> Result<(), PersistFailure> {
        (**self).persist(document)
    }
}
