use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use reconerp_core::{CustomerId, DomainError, DomainResult, ItemId, OrderId, OrderLineId, QuoteId};

use crate::pricing_fields::PricingFields;

/// Sales order header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesOrder {
    pub id: OrderId,
    pub customer_id: Option<CustomerId>,
    /// Quotation this order was converted from, when one exists.
    pub quotation_id: Option<QuoteId>,
    pub currency: String,
    /// Header-level pricing defaults (resolution tier 4).
    pub pricing: PricingFields,
    pub ordered_at: DateTime<Utc>,
}

/// Sales order line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub id: OrderLineId,
    pub order_id: OrderId,
    pub item_id: Option<ItemId>,
    pub description: String,
    pub line_number: Option<u32>,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub pricing: PricingFields,
}

impl OrderLine {
    /// Invariant: ordered quantity is never negative.
    pub fn validate(&self) -> DomainResult<()> {
        if self.quantity < Decimal::ZERO {
            return Err(DomainError::validation(format!(
                "order line {} has negative quantity {}",
                self.id, self.quantity
            )));
        }
        Ok(())
    }
}
