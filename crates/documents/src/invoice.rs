use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use reconerp_core::{DeliveryLineId, InvoiceId, InvoiceLineId, OrderLineId};

/// An already-persisted invoice line, as read back for reconciliation.
///
/// Only the quantity and its upstream references matter here; amounts on
/// existing invoices never feed back into a new derivation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceLineRecord {
    pub id: InvoiceLineId,
    pub invoice_id: InvoiceId,
    pub order_line_id: Option<OrderLineId>,
    pub delivery_line_id: Option<DeliveryLineId>,
    pub quantity: Decimal,
}
