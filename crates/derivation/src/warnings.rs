//! Data-quality warnings.
//!
//! Non-fatal findings collected while a derivation degrades gracefully
//! around imperfect upstream data. They are returned with the outcome and
//! logged, but never abort the derivation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use reconerp_core::{Money, OrderLineId, UserId};
use reconerp_pricing::MatchStrategy;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataQualityWarning {
    /// An item reference was missing or unresolvable and a minimal
    /// placeholder item was synthesized so the line survived.
    PlaceholderItem { description: String },

    /// An upstream line was paired by a heuristic with no semantic signal
    /// (positional or first-available fallback).
    LowConfidenceMatch { reference: String, strategy: MatchStrategy },

    /// Cumulative fulfillment events exceed the ordered quantity; the
    /// remaining quantity was clamped to zero.
    OverFulfillment {
        order_line_id: OrderLineId,
        ordered: Decimal,
        delivered: Decimal,
        invoiced: Decimal,
    },

    /// A line carried no computable quantity or price and was skipped.
    LineSkipped { reference: String, reason: String },

    /// Line amounts were internally inconsistent; the grand total was
    /// recomputed from the sum of line totals.
    TotalsRecovered { grand_total: Money },

    /// The created-by audit reference was rejected by storage and the
    /// document was persisted without it.
    AuditReferenceDropped { user_id: UserId },
}

impl core::fmt::Display for DataQualityWarning {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DataQualityWarning::PlaceholderItem { description } => {
                write!(f, "placeholder item synthesized for '{description}'")
            }
            DataQualityWarning::LowConfidenceMatch { reference, strategy } => {
                write!(f, "line {reference} paired via {} fallback", strategy.as_str())
            }
            DataQualityWarning::OverFulfillment { order_line_id, ordered, delivered, invoiced } => {
                write!(
                    f,
                    "order line {order_line_id} over-fulfilled (ordered {ordered}, delivered {delivered}, invoiced {invoiced})"
                )
            }
            DataQualityWarning::LineSkipped { reference, reason } => {
                write!(f, "line {reference} skipped: {reason}")
            }
            DataQualityWarning::TotalsRecovered { grand_total } => {
                write!(f, "grand total recomputed from line totals as {grand_total}")
            }
            DataQualityWarning::AuditReferenceDropped { user_id } => {
                write!(f, "created-by reference {user_id} dropped during persistence")
            }
        }
    }
}
