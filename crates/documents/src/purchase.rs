use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use reconerp_core::{ItemId, PurchaseOrderId, PurchaseOrderLineId, SupplierId};

use crate::pricing_fields::PricingFields;

/// Upstream purchase order (LPO) header.
///
/// When a supplier delivery references an LPO, its lines become the
/// top-priority pricing ancestor for invoice derivation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseOrder {
    pub id: PurchaseOrderId,
    pub supplier_id: SupplierId,
    pub currency: String,
    pub pricing: PricingFields,
}

/// Upstream purchase order line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseOrderLine {
    pub id: PurchaseOrderLineId,
    pub purchase_order_id: PurchaseOrderId,
    pub item_id: Option<ItemId>,
    pub description: String,
    pub line_number: Option<u32>,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub pricing: PricingFields,
}
