//! Pricing attribute resolver.
//!
//! Source data is frequently incomplete, so resolution never fails: the
//! caller assembles the pricing ancestors of a line in priority order and
//! the resolver picks, for each of the four attributes independently, the
//! first ancestor that carries a non-empty, non-zero value. A line whose
//! whole chain is empty resolves to zero discount and zero VAT.
//!
//! Every resolved attribute records which ancestor supplied it, so the
//! choice stays traceable for audit.

use serde::{Deserialize, Serialize};

use reconerp_core::{Money, Percent};
use reconerp_documents::PricingFields;

/// The ancestor tier a resolved attribute came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingSource {
    PurchaseOrderLine,
    QuoteLine,
    OrderLine,
    DocumentHeader,
    DeliveryLine,
    /// No ancestor carried the attribute; it resolved to zero.
    None,
}

impl PricingSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            PricingSource::PurchaseOrderLine => "purchase_order_line",
            PricingSource::QuoteLine => "quote_line",
            PricingSource::OrderLine => "order_line",
            PricingSource::DocumentHeader => "document_header",
            PricingSource::DeliveryLine => "delivery_line",
            PricingSource::None => "none",
        }
    }
}

/// A pricing ancestor, tagged with the tier it represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AncestorPricing {
    pub source: PricingSource,
    pub fields: PricingFields,
}

impl AncestorPricing {
    pub fn new(source: PricingSource, fields: PricingFields) -> Self {
        Self { source, fields }
    }
}

/// A resolved attribute together with its provenance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolved<T> {
    pub value: T,
    pub source: PricingSource,
}

/// Per-line resolver output: the effective discount/VAT attributes.
///
/// Percentages default to zero when unresolved; amount overrides stay
/// `None` unless an ancestor supplied an explicit positive amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedPricing {
    pub discount_percent: Resolved<Percent>,
    pub discount_amount: Resolved<Option<Money>>,
    pub vat_percent: Resolved<Percent>,
    pub vat_amount: Resolved<Option<Money>>,
}

impl ResolvedPricing {
    /// Zero discount, zero VAT, no provenance.
    pub fn zero() -> Self {
        Self {
            discount_percent: Resolved { value: Percent::zero(), source: PricingSource::None },
            discount_amount: Resolved { value: None, source: PricingSource::None },
            vat_percent: Resolved { value: Percent::zero(), source: PricingSource::None },
            vat_amount: Resolved { value: None, source: PricingSource::None },
        }
    }

    /// True when nothing in the chain supplied any attribute.
    pub fn is_unpriced(&self) -> bool {
        self.discount_percent.source == PricingSource::None
            && self.discount_amount.source == PricingSource::None
            && self.vat_percent.source == PricingSource::None
            && self.vat_amount.source == PricingSource::None
    }
}

/// First candidate whose `get` yields a present, non-zero value wins.
fn pick<T: Copy>(
    candidates: &[AncestorPricing],
    get: impl Fn(&PricingFields) -> Option<T>,
    is_zero: impl Fn(&T) -> bool,
) -> Resolved<Option<T>> {
    for candidate in candidates {
        if let Some(value) = get(&candidate.fields) {
            if !is_zero(&value) {
                return Resolved { value: Some(value), source: candidate.source };
            }
        }
    }
    Resolved { value: None, source: PricingSource::None }
}

/// Resolve the effective pricing attributes for one line.
///
/// `candidates` must already be ordered by priority (purchase-order line,
/// quote line, order line, document header, delivery line).
pub fn resolve(candidates: &[AncestorPricing]) -> ResolvedPricing {
    let discount_percent = pick(candidates, |f| f.discount_percent, Percent::is_zero);
    let discount_amount = pick(candidates, |f| f.discount_amount, Money::is_zero);
    let vat_percent = pick(candidates, |f| f.vat_percent, Percent::is_zero);
    let vat_amount = pick(candidates, |f| f.vat_amount, Money::is_zero);

    tracing::debug!(
        discount_percent = discount_percent.source.as_str(),
        discount_amount = discount_amount.source.as_str(),
        vat_percent = vat_percent.source.as_str(),
        vat_amount = vat_amount.source.as_str(),
        "pricing attributes resolved"
    );

    ResolvedPricing {
        discount_percent: Resolved {
            value: discount_percent.value.unwrap_or_else(Percent::zero),
            source: discount_percent.source,
        },
        discount_amount,
        vat_percent: Resolved {
            value: vat_percent.value.unwrap_or_else(Percent::zero),
            source: vat_percent.source,
        },
        vat_amount,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn fields(
        discount_percent: Option<Percent>,
        discount_amount: Option<Money>,
        vat_percent: Option<Percent>,
        vat_amount: Option<Money>,
    ) -> PricingFields {
        PricingFields { discount_percent, discount_amount, vat_percent, vat_amount }
    }

    #[test]
    fn first_non_zero_value_wins_per_attribute() {
        let candidates = vec![
            AncestorPricing::new(
                PricingSource::QuoteLine,
                fields(Some(Percent::new(dec!(10))), None, None, None),
            ),
            AncestorPricing::new(
                PricingSource::OrderLine,
                fields(Some(Percent::new(dec!(20))), None, Some(Percent::new(dec!(5))), None),
            ),
        ];

        let resolved = resolve(&candidates);
        assert_eq!(resolved.discount_percent.value, Percent::new(dec!(10)));
        assert_eq!(resolved.discount_percent.source, PricingSource::QuoteLine);
        // VAT came from a lower tier, independently of the discount.
        assert_eq!(resolved.vat_percent.value, Percent::new(dec!(5)));
        assert_eq!(resolved.vat_percent.source, PricingSource::OrderLine);
    }

    #[test]
    fn zero_values_are_skipped() {
        let candidates = vec![
            AncestorPricing::new(
                PricingSource::QuoteLine,
                fields(Some(Percent::zero()), None, None, None),
            ),
            AncestorPricing::new(
                PricingSource::DocumentHeader,
                fields(Some(Percent::new(dec!(7.5))), None, None, None),
            ),
        ];

        let resolved = resolve(&candidates);
        assert_eq!(resolved.discount_percent.value, Percent::new(dec!(7.5)));
        assert_eq!(resolved.discount_percent.source, PricingSource::DocumentHeader);
    }

    #[test]
    fn purchase_order_line_outranks_everything() {
        let candidates = vec![
            AncestorPricing::new(
                PricingSource::PurchaseOrderLine,
                fields(None, Some(Money::new(dec!(12.00))), Some(Percent::new(dec!(16))), None),
            ),
            AncestorPricing::new(
                PricingSource::QuoteLine,
                fields(Some(Percent::new(dec!(10))), None, Some(Percent::new(dec!(5))), None),
            ),
        ];

        let resolved = resolve(&candidates);
        assert_eq!(resolved.discount_amount.value, Some(Money::new(dec!(12.00))));
        assert_eq!(resolved.discount_amount.source, PricingSource::PurchaseOrderLine);
        assert_eq!(resolved.vat_percent.source, PricingSource::PurchaseOrderLine);
        // Percent fell through past the purchase order line, which had none.
        assert_eq!(resolved.discount_percent.value, Percent::new(dec!(10)));
        assert_eq!(resolved.discount_percent.source, PricingSource::QuoteLine);
    }

    #[test]
    fn empty_chain_resolves_to_zero() {
        let resolved = resolve(&[]);
        assert!(resolved.is_unpriced());
        assert_eq!(resolved.discount_percent.value, Percent::zero());
        assert_eq!(resolved.vat_percent.value, Percent::zero());
        assert_eq!(resolved.discount_amount.value, None);
        assert_eq!(resolved.vat_amount.value, None);
    }

    #[test]
    fn delivery_line_is_last_resort_before_zero() {
        let candidates = vec![
            AncestorPricing::new(PricingSource::OrderLine, PricingFields::none()),
            AncestorPricing::new(
                PricingSource::DeliveryLine,
                fields(None, None, Some(Percent::new(dec!(5))), None),
            ),
        ];

        let resolved = resolve(&candidates);
        assert_eq!(resolved.vat_percent.source, PricingSource::DeliveryLine);
        assert_eq!(resolved.discount_percent.source, PricingSource::None);
    }
}
