//! Derived document model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use reconerp_core::{CustomerId, DocumentRef, ItemId, Money, OrderLineId, QuoteLineId, SupplierId, UserId};
use reconerp_numbering::DocumentNumber;
use reconerp_pricing::{ComputedLine, ResolvedPricing};

/// The kind of document a derivation produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DerivedDocumentType {
    Invoice,
    PurchaseOrder,
}

impl DerivedDocumentType {
    pub fn number_prefix(&self) -> &'static str {
        match self {
            DerivedDocumentType::Invoice => "INV",
            DerivedDocumentType::PurchaseOrder => "LPO",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DerivedDocumentType::Invoice => "invoice",
            DerivedDocumentType::PurchaseOrder => "purchase_order",
        }
    }
}

/// Derived document lifecycle status.
///
/// A derivation always produces a `Draft`; issuing is a separate,
/// explicit operation owned by the surrounding application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DerivedStatus {
    Draft,
    Issued,
}

/// One line of a derived document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedLine {
    pub line_no: u32,
    pub item_id: Option<ItemId>,
    /// Source order line this line fulfils (invoices).
    pub order_line_id: Option<OrderLineId>,
    /// Source quote line this line was taken from (purchase orders).
    pub quote_line_id: Option<QuoteLineId>,
    pub description: String,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub pricing: ResolvedPricing,
    pub amounts: ComputedLine,
}

/// Header-level totals, produced by a pure fold over the lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentTotals {
    pub subtotal: Money,
    pub discount_total: Money,
    pub tax_total: Money,
    pub grand_total: Money,
}

/// Fold result: the totals plus whether the recovery path fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FoldedTotals {
    pub totals: DocumentTotals,
    /// True when `subtotal + tax` disagreed with the sum of line totals
    /// and the grand total was recomputed from the lines.
    pub recovered: bool,
}

impl DocumentTotals {
    /// Aggregate line amounts into header totals.
    ///
    /// Normally `grand_total = subtotal + tax_total`; when the per-line
    /// amounts are internally inconsistent the sum of line totals wins,
    /// flagged via [`FoldedTotals::recovered`].
    pub fn fold(lines: &[DerivedLine]) -> FoldedTotals {
        let (subtotal, discount_total, tax_total, line_total_sum) = lines.iter().fold(
            (Money::zero(), Money::zero(), Money::zero(), Money::zero()),
            |(subtotal, discount, tax, totals), line| {
                (
                    subtotal + line.amounts.net,
                    discount + line.amounts.discount,
                    tax + line.amounts.vat,
                    totals + line.amounts.total,
                )
            },
        );

        let grand_total = subtotal + tax_total;
        if grand_total == line_total_sum {
            FoldedTotals {
                totals: DocumentTotals { subtotal, discount_total, tax_total, grand_total },
                recovered: false,
            }
        } else {
            FoldedTotals {
                totals: DocumentTotals {
                    subtotal,
                    discount_total,
                    tax_total,
                    grand_total: line_total_sum,
                },
                recovered: true,
            }
        }
    }
}

/// A newly derived invoice or purchase order, ready for atomic persistence.
///
/// Never silently overwritten: a repeated derivation produces a new,
/// separately numbered document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedDocument {
    pub number: DocumentNumber,
    pub doc_type: DerivedDocumentType,
    pub status: DerivedStatus,
    pub currency: String,
    pub supplier_id: Option<SupplierId>,
    pub customer_id: Option<CustomerId>,
    pub created_by: Option<UserId>,
    pub source_refs: Vec<DocumentRef>,
    pub totals: DocumentTotals,
    pub issued_at: DateTime<Utc>,
    pub lines: Vec<DerivedLine>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use reconerp_pricing::compute_resolved;
    use rust_decimal_macros::dec;

    fn line(line_no: u32, quantity: Decimal, unit_price: Decimal) -> DerivedLine {
        let pricing = ResolvedPricing::zero();
        let amounts = compute_resolved(quantity, unit_price, &pricing);
        DerivedLine {
            line_no,
            item_id: None,
            order_line_id: None,
            quote_line_id: None,
            description: "Line".to_string(),
            quantity,
            unit_price,
            pricing,
            amounts,
        }
    }

    #[test]
    fn fold_sums_consistent_lines_without_recovery() {
        let lines = vec![line(1, dec!(2), dec!(10.00)), line(2, dec!(1), dec!(5.50))];

        let folded = DocumentTotals::fold(&lines);
        assert!(!folded.recovered);
        assert_eq!(folded.totals.subtotal, Money::new(dec!(25.50)));
        assert_eq!(folded.totals.grand_total, Money::new(dec!(25.50)));
    }

    #[test]
    fn fold_recovers_grand_total_from_line_totals() {
        let mut bad = line(1, dec!(1), dec!(100.00));
        // Line total disagrees with net + vat.
        bad.amounts.total = Money::new(dec!(90.00));

        let folded = DocumentTotals::fold(&[bad]);
        assert!(folded.recovered);
        assert_eq!(folded.totals.subtotal, Money::new(dec!(100.00)));
        assert_eq!(folded.totals.grand_total, Money::new(dec!(90.00)));
    }

    #[test]
    fn fold_of_no_lines_is_zero() {
        let folded = DocumentTotals::fold(&[]);
        assert!(!folded.recovered);
        assert_eq!(folded.totals.subtotal, Money::zero());
    }
}
