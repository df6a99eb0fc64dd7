use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use reconerp_core::{DeliveryId, DeliveryLineId, ItemId, OrderId, OrderLineId, PurchaseOrderId};

use crate::pricing_fields::PricingFields;

/// Delivery note header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delivery {
    pub id: DeliveryId,
    /// Sales order this delivery fulfils. Mandatory when deriving an
    /// invoice from the delivery.
    pub order_id: Option<OrderId>,
    /// Purchase order (LPO) this delivery was received against, for
    /// supplier-side deliveries.
    pub purchase_order_id: Option<PurchaseOrderId>,
    pub delivered_at: DateTime<Utc>,
}

/// Delivery line.
///
/// Quantities are recorded at three stages (ordered, picked, delivered);
/// any of them may be zero on a partially processed line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryLine {
    pub id: DeliveryLineId,
    pub delivery_id: DeliveryId,
    pub order_line_id: Option<OrderLineId>,
    pub item_id: Option<ItemId>,
    pub description: Option<String>,
    pub delivered_quantity: Decimal,
    pub picked_quantity: Decimal,
    pub ordered_quantity: Decimal,
    pub unit_price: Option<Decimal>,
    /// Pricing attributes on the delivery line itself (resolution tier 5).
    pub pricing: PricingFields,
}

impl DeliveryLine {
    /// The quantity this line actually moved: delivered, falling back to
    /// picked, falling back to ordered.
    pub fn moved_quantity(&self) -> Decimal {
        if self.delivered_quantity > Decimal::ZERO {
            self.delivered_quantity
        } else if self.picked_quantity > Decimal::ZERO {
            self.picked_quantity
        } else {
            self.ordered_quantity
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn line(delivered: Decimal, picked: Decimal, ordered: Decimal) -> DeliveryLine {
        DeliveryLine {
            id: DeliveryLineId::new(),
            delivery_id: DeliveryId::new(),
            order_line_id: None,
            item_id: None,
            description: None,
            delivered_quantity: delivered,
            picked_quantity: picked,
            ordered_quantity: ordered,
            unit_price: None,
            pricing: PricingFields::none(),
        }
    }

    #[test]
    fn moved_quantity_prefers_delivered() {
        assert_eq!(line(dec!(4), dec!(5), dec!(10)).moved_quantity(), dec!(4));
    }

    #[test]
    fn moved_quantity_falls_back_to_picked_then_ordered() {
        assert_eq!(line(dec!(0), dec!(5), dec!(10)).moved_quantity(), dec!(5));
        assert_eq!(line(dec!(0), dec!(0), dec!(10)).moved_quantity(), dec!(10));
    }
}
