//! Line computation engine.
//!
//! Pure arithmetic, no side effects, deterministic for identical inputs.
//! Every intermediate amount is rounded to 2 decimal places before it
//! participates in the next step, so rounding drift cannot compound
//! across a many-line document.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use reconerp_core::{Money, Percent};

use crate::resolver::ResolvedPricing;

/// Per-line computed amounts. All values are non-negative and carry
/// exactly 2 decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputedLine {
    pub gross: Money,
    pub discount: Money,
    pub net: Money,
    pub vat: Money,
    pub total: Money,
}

/// Discounts are capped at 99.9% of gross so net never reaches zero.
fn discount_cap(gross: Money) -> Money {
    Money::new(gross.amount() * Decimal::new(999, 3))
}

/// Compute line financials from quantity, unit price, and pricing
/// attributes. An explicit positive amount override beats the percentage
/// for that attribute.
///
/// Callers are expected to pass non-negative quantity and unit price;
/// lines that fail that check are skipped upstream.
pub fn compute(
    quantity: Decimal,
    unit_price: Decimal,
    discount_percent: Percent,
    discount_override: Option<Money>,
    vat_percent: Percent,
    vat_override: Option<Money>,
) -> ComputedLine {
    let gross = Money::new(quantity * unit_price);

    let discount = match discount_override {
        Some(amount) if amount.is_positive() => amount,
        _ => discount_percent.of(gross),
    };
    let discount = discount.min(discount_cap(gross)).max(Money::zero());

    let net = (gross - discount).max(Money::cent());

    let vat = match vat_override {
        Some(amount) if amount.is_positive() => amount,
        _ => vat_percent.of(net),
    };

    let total = net + vat;

    ComputedLine { gross, discount, net, vat, total }
}

/// Convenience wrapper taking the resolver's output.
pub fn compute_resolved(
    quantity: Decimal,
    unit_price: Decimal,
    pricing: &ResolvedPricing,
) -> ComputedLine {
    compute(
        quantity,
        unit_price,
        pricing.discount_percent.value,
        pricing.discount_amount.value,
        pricing.vat_percent.value,
        pricing.vat_amount.value,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    #[test]
    fn ten_units_at_hundred_with_discount_and_vat() {
        // quantity=10, unitPrice=100, discount 10%, VAT 5%
        let line = compute(
            dec!(10),
            dec!(100),
            Percent::new(dec!(10)),
            None,
            Percent::new(dec!(5)),
            None,
        );

        assert_eq!(line.gross, Money::new(dec!(1000.00)));
        assert_eq!(line.discount, Money::new(dec!(100.00)));
        assert_eq!(line.net, Money::new(dec!(900.00)));
        assert_eq!(line.vat, Money::new(dec!(45.00)));
        assert_eq!(line.total, Money::new(dec!(945.00)));
    }

    #[test]
    fn amount_override_beats_percentage() {
        let line = compute(
            dec!(2),
            dec!(50),
            Percent::new(dec!(10)),
            Some(Money::new(dec!(5.00))),
            Percent::new(dec!(5)),
            Some(Money::new(dec!(1.23))),
        );

        assert_eq!(line.discount, Money::new(dec!(5.00)));
        assert_eq!(line.net, Money::new(dec!(95.00)));
        assert_eq!(line.vat, Money::new(dec!(1.23)));
        assert_eq!(line.total, Money::new(dec!(96.23)));
    }

    #[test]
    fn discount_never_wipes_out_the_line() {
        // 150% discount collapses to the 99.9% cap, and net floors at a cent.
        let line = compute(
            dec!(1),
            dec!(10.00),
            Percent::new(dec!(150)),
            None,
            Percent::zero(),
            None,
        );

        assert_eq!(line.discount, Money::new(dec!(9.99)));
        assert_eq!(line.net, Money::new(dec!(0.01)));
        assert_eq!(line.total, line.net);
    }

    #[test]
    fn oversized_override_is_capped() {
        let line = compute(
            dec!(1),
            dec!(100.00),
            Percent::zero(),
            Some(Money::new(dec!(500.00))),
            Percent::zero(),
            None,
        );

        assert_eq!(line.discount, Money::new(dec!(99.90)));
        assert_eq!(line.net, Money::new(dec!(0.10)));
    }

    #[test]
    fn fractional_quantities_round_at_each_step() {
        // 3.5 × 9.995 = 34.9825 → 34.98 gross
        let line = compute(
            dec!(3.5),
            dec!(9.995),
            Percent::zero(),
            None,
            Percent::new(dec!(16)),
            None,
        );

        assert_eq!(line.gross, Money::new(dec!(34.98)));
        // 34.98 × 16% = 5.5968 → 5.60
        assert_eq!(line.vat, Money::new(dec!(5.60)));
        assert_eq!(line.total, Money::new(dec!(40.58)));
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 512,
            ..ProptestConfig::default()
        })]

        /// Guards: discount stays within [0, gross × 0.999] (to rounding
        /// tolerance), net never drops below one cent, and total is the
        /// exact sum of net and VAT.
        #[test]
        fn computed_amounts_respect_guards(
            quantity_minor in 0i64..=1_000_000,
            price_mils in 0i64..=10_000_000,
            discount_bps in 0i64..=15_000,
            vat_bps in 0i64..=2_500,
            discount_override in proptest::option::of(0i64..=2_000_000),
            vat_override in proptest::option::of(0i64..=2_000_000),
        ) {
            let line = compute(
                Decimal::new(quantity_minor, 2),
                Decimal::new(price_mils, 3),
                Percent::new(Decimal::new(discount_bps, 2)),
                discount_override.map(Money::from_minor),
                Percent::new(Decimal::new(vat_bps, 2)),
                vat_override.map(Money::from_minor),
            );

            let tolerance = Decimal::new(1, 2);
            prop_assert!(line.discount >= Money::zero());
            prop_assert!(
                line.discount.amount() <= line.gross.amount() * Decimal::new(999, 3) + tolerance
            );
            prop_assert!(line.net >= Money::cent());
            prop_assert_eq!(line.total, line.net + line.vat);
        }

        /// Idempotence: identical inputs yield identical outputs.
        #[test]
        fn compute_is_deterministic(
            quantity_minor in 0i64..=1_000_000,
            price_mils in 0i64..=10_000_000,
            discount_bps in 0i64..=15_000,
            vat_bps in 0i64..=2_500,
        ) {
            let run = || compute(
                Decimal::new(quantity_minor, 2),
                Decimal::new(price_mils, 3),
                Percent::new(Decimal::new(discount_bps, 2)),
                None,
                Percent::new(Decimal::new(vat_bps, 2)),
                None,
            );

            prop_assert_eq!(run(), run());
        }
    }
}
