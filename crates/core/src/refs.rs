//! Cross-document references.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::id::{DeliveryId, InvoiceId, OrderId, PurchaseOrderId, QuoteId};

/// The kind of document a reference points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Quotation,
    SalesOrder,
    Delivery,
    Invoice,
    PurchaseOrder,
}

impl DocumentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Quotation => "quotation",
            DocumentKind::SalesOrder => "sales_order",
            DocumentKind::Delivery => "delivery",
            DocumentKind::Invoice => "invoice",
            DocumentKind::PurchaseOrder => "purchase_order",
        }
    }
}

/// Reference to an upstream or derived document.
///
/// Derivation requests carry these, and derived headers record the set of
/// documents they were produced from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentRef {
    pub kind: DocumentKind,
    pub id: Uuid,
}

impl DocumentRef {
    pub fn quotation(id: QuoteId) -> Self {
        Self { kind: DocumentKind::Quotation, id: id.into() }
    }

    pub fn sales_order(id: OrderId) -> Self {
        Self { kind: DocumentKind::SalesOrder, id: id.into() }
    }

    pub fn delivery(id: DeliveryId) -> Self {
        Self { kind: DocumentKind::Delivery, id: id.into() }
    }

    pub fn invoice(id: InvoiceId) -> Self {
        Self { kind: DocumentKind::Invoice, id: id.into() }
    }

    pub fn purchase_order(id: PurchaseOrderId) -> Self {
        Self { kind: DocumentKind::PurchaseOrder, id: id.into() }
    }
}

impl core::fmt::Display for DocumentRef {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}:{}", self.kind.as_str(), self.id)
    }
}
