use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use reconerp_core::{CustomerId, ItemId, QuoteId, QuoteLineId, SupplierId};

use crate::pricing_fields::PricingFields;

/// Quotation header.
///
/// A customer quotation carries a `customer_id`; a supplier quote carries
/// a `supplier_id` (used for grouping when deriving purchase orders).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quotation {
    pub id: QuoteId,
    pub supplier_id: Option<SupplierId>,
    pub customer_id: Option<CustomerId>,
    pub currency: String,
    /// Header-level pricing defaults (resolution tier 4).
    pub pricing: PricingFields,
    pub quoted_at: DateTime<Utc>,
}

/// Quotation line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteLine {
    pub id: QuoteLineId,
    pub quote_id: QuoteId,
    pub item_id: Option<ItemId>,
    pub description: String,
    pub line_number: Option<u32>,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub pricing: PricingFields,
}
