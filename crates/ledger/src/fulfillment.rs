use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use reconerp_core::{DocumentRef, OrderLineId};
use reconerp_documents::{Delivery, DeliveryLine, InvoiceLineRecord};

/// The kind of movement an event records against an order line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FulfillmentKind {
    Delivery,
    Invoice,
}

/// A quantity movement against an order line.
///
/// `order_line_id` may be absent for ad-hoc lines; such events never
/// count toward any order line's cumulative totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FulfillmentEvent {
    pub order_line_id: Option<OrderLineId>,
    pub kind: FulfillmentKind,
    pub quantity: Decimal,
    pub origin: DocumentRef,
    pub occurred_at: DateTime<Utc>,
}

impl FulfillmentEvent {
    /// Record the movement of a delivery line.
    pub fn from_delivery_line(delivery: &Delivery, line: &DeliveryLine) -> Self {
        Self {
            order_line_id: line.order_line_id,
            kind: FulfillmentKind::Delivery,
            quantity: line.moved_quantity(),
            origin: DocumentRef::delivery(delivery.id),
            occurred_at: delivery.delivered_at,
        }
    }

    /// Record the movement of an already-persisted invoice line.
    pub fn from_invoice_line(record: &InvoiceLineRecord, occurred_at: DateTime<Utc>) -> Self {
        Self {
            order_line_id: record.order_line_id,
            kind: FulfillmentKind::Invoice,
            quantity: record.quantity,
            origin: DocumentRef::invoice(record.invoice_id),
            occurred_at,
        }
    }
}

/// Reconciled position of one order line against its full event history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineReconciliation {
    pub order_line_id: OrderLineId,
    pub ordered: Decimal,
    /// Cumulative quantity across all delivery events.
    pub delivered: Decimal,
    /// Cumulative quantity across all invoice events.
    pub invoiced: Decimal,
    /// `max(0, ordered − delivered)`.
    pub remaining_to_deliver: Decimal,
    /// `max(0, ordered − invoiced)`.
    pub remaining_to_invoice: Decimal,
}

impl LineReconciliation {
    pub fn over_delivered(&self) -> bool {
        self.delivered > self.ordered
    }

    pub fn over_invoiced(&self) -> bool {
        self.invoiced > self.ordered
    }

    /// True when either cumulative sum exceeds the ordered quantity and
    /// the remaining value was clamped to zero.
    pub fn is_clamped(&self) -> bool {
        self.over_delivered() || self.over_invoiced()
    }

    /// Quantity an invoice derivation may carry for this line: what has
    /// been delivered but not yet invoiced, capped at the ordered
    /// quantity. Before any delivery exists, the not-yet-invoiced part of
    /// the ordered quantity is offered instead (first fulfillment).
    pub fn invoiceable(&self) -> Decimal {
        let base = if self.delivered > Decimal::ZERO {
            self.delivered.min(self.ordered)
        } else {
            self.ordered
        };
        (base - self.invoiced).max(Decimal::ZERO)
    }
}

/// Reconcile one order line against its complete fulfillment history.
///
/// Events referencing other lines (or no line) are ignored. A cumulative
/// sum exceeding the ordered quantity clamps remaining to zero rather
/// than going negative; callers surface that as a reconciliation warning,
/// not a hard failure.
pub fn reconcile(
    order_line_id: OrderLineId,
    ordered: Decimal,
    events: &[FulfillmentEvent],
) -> LineReconciliation {
    let mut delivered = Decimal::ZERO;
    let mut invoiced = Decimal::ZERO;

    for event in events {
        if event.order_line_id != Some(order_line_id) {
            continue;
        }
        match event.kind {
            FulfillmentKind::Delivery => delivered += event.quantity,
            FulfillmentKind::Invoice => invoiced += event.quantity,
        }
    }

    let reconciliation = LineReconciliation {
        order_line_id,
        ordered,
        delivered,
        invoiced,
        remaining_to_deliver: (ordered - delivered).max(Decimal::ZERO),
        remaining_to_invoice: (ordered - invoiced).max(Decimal::ZERO),
    };

    if reconciliation.is_clamped() {
        tracing::warn!(
            order_line_id = %order_line_id,
            ordered = %ordered,
            delivered = %delivered,
            invoiced = %invoiced,
            "cumulative fulfillment exceeds ordered quantity; remaining clamped to zero"
        );
    }

    reconciliation
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use reconerp_core::{DeliveryId, InvoiceId};
    use rust_decimal_macros::dec;

    fn delivery_event(line: OrderLineId, quantity: Decimal) -> FulfillmentEvent {
        FulfillmentEvent {
            order_line_id: Some(line),
            kind: FulfillmentKind::Delivery,
            quantity,
            origin: DocumentRef::delivery(DeliveryId::new()),
            occurred_at: Utc::now(),
        }
    }

    fn invoice_event(line: OrderLineId, quantity: Decimal) -> FulfillmentEvent {
        FulfillmentEvent {
            order_line_id: Some(line),
            kind: FulfillmentKind::Invoice,
            quantity,
            origin: DocumentRef::invoice(InvoiceId::new()),
            occurred_at: Utc::now(),
        }
    }

    #[test]
    fn no_events_means_full_quantity_remaining() {
        let line = OrderLineId::new();
        let recon = reconcile(line, dec!(10), &[]);

        assert_eq!(recon.delivered, dec!(0));
        assert_eq!(recon.invoiced, dec!(0));
        assert_eq!(recon.remaining_to_deliver, dec!(10));
        assert_eq!(recon.invoiceable(), dec!(10));
        assert!(!recon.is_clamped());
    }

    #[test]
    fn partial_events_accumulate_across_documents() {
        let line = OrderLineId::new();
        let events = vec![delivery_event(line, dec!(4)), delivery_event(line, dec!(6))];

        let recon = reconcile(line, dec!(10), &events);
        assert_eq!(recon.delivered, dec!(10));
        assert_eq!(recon.remaining_to_deliver, dec!(0));
        assert_eq!(recon.invoiceable(), dec!(10));
    }

    #[test]
    fn events_for_other_lines_are_ignored() {
        let line = OrderLineId::new();
        let other = OrderLineId::new();
        let mut events = vec![delivery_event(line, dec!(3)), delivery_event(other, dec!(7))];
        events.push(FulfillmentEvent {
            order_line_id: None,
            kind: FulfillmentKind::Delivery,
            quantity: dec!(99),
            origin: DocumentRef::delivery(DeliveryId::new()),
            occurred_at: Utc::now(),
        });

        let recon = reconcile(line, dec!(10), &events);
        assert_eq!(recon.delivered, dec!(3));
        assert_eq!(recon.remaining_to_deliver, dec!(7));
    }

    #[test]
    fn invoiced_quantity_reduces_what_is_invoiceable() {
        let line = OrderLineId::new();
        let events = vec![
            delivery_event(line, dec!(4)),
            delivery_event(line, dec!(6)),
            invoice_event(line, dec!(4)),
        ];

        let recon = reconcile(line, dec!(10), &events);
        assert_eq!(recon.invoiced, dec!(4));
        assert_eq!(recon.remaining_to_invoice, dec!(6));
        assert_eq!(recon.invoiceable(), dec!(6));
    }

    #[test]
    fn over_fulfillment_clamps_to_zero_instead_of_negative() {
        let line = OrderLineId::new();
        let events = vec![delivery_event(line, dec!(8)), delivery_event(line, dec!(5))];

        let recon = reconcile(line, dec!(10), &events);
        assert_eq!(recon.delivered, dec!(13));
        assert_eq!(recon.remaining_to_deliver, dec!(0));
        assert!(recon.over_delivered());
        assert!(recon.is_clamped());
        // Invoicing is still capped at the ordered quantity.
        assert_eq!(recon.invoiceable(), dec!(10));
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Remaining quantities never go negative, for any event history.
        #[test]
        fn remaining_is_never_negative(
            ordered_minor in 0i64..=1_000_000,
            deliveries in prop::collection::vec(0i64..=500_000, 0..8),
            invoices in prop::collection::vec(0i64..=500_000, 0..8),
        ) {
            let line = OrderLineId::new();
            let mut events = Vec::new();
            for d in deliveries {
                events.push(delivery_event(line, Decimal::new(d, 2)));
            }
            for i in invoices {
                events.push(invoice_event(line, Decimal::new(i, 2)));
            }

            let recon = reconcile(line, Decimal::new(ordered_minor, 2), &events);
            prop_assert!(recon.remaining_to_deliver >= Decimal::ZERO);
            prop_assert!(recon.remaining_to_invoice >= Decimal::ZERO);
            prop_assert!(recon.invoiceable() >= Decimal::ZERO);
            // Invoiceable quantity never exceeds what was ordered.
            prop_assert!(recon.invoiceable() <= recon.ordered);
        }
    }
}
