//! Monetary value objects.
//!
//! All financial math in the engine runs on [`rust_decimal::Decimal`].
//! [`Money`] is normalized to 2 decimal places at construction (half-up),
//! so every intermediate amount is rounded before it participates in an
//! aggregate; unit costs keep up to 3 decimal places where the currency
//! convention requires it.

use core::iter::Sum;
use core::ops::{Add, AddAssign, Sub};

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Round to 2 decimal places, half away from zero.
fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Round a unit cost to 3 decimal places, half away from zero.
pub fn round_unit_cost(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(3, RoundingStrategy::MidpointAwayFromZero)
}

/// A monetary amount, always carrying exactly 2 decimal places.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Smallest representable amount (one cent).
    pub fn cent() -> Self {
        Self(Decimal::new(1, 2))
    }

    pub const fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// Construct from an arbitrary-precision amount, rounding to 2 dp.
    pub fn new(amount: Decimal) -> Self {
        Self(round2(amount))
    }

    /// Construct from an amount in minor units (cents).
    pub fn from_minor(minor: i64) -> Self {
        Self(Decimal::new(minor, 2))
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    pub fn min(self, other: Self) -> Self {
        if self.0 <= other.0 { self } else { other }
    }

    pub fn max(self, other: Self) -> Self {
        if self.0 >= other.0 { self } else { other }
    }
}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, m| acc + m)
    }
}

/// A percentage rate (10 means 10%).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Percent(Decimal);

impl Percent {
    pub const fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    pub fn new(rate: Decimal) -> Self {
        Self(rate)
    }

    pub fn rate(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Apply this rate to a base amount: `base × rate / 100`, rounded.
    pub fn of(&self, base: Money) -> Money {
        Money::new(base.amount() * self.0 / Decimal::ONE_HUNDRED)
    }
}

impl core::fmt::Display for Percent {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn money_rounds_half_up_at_two_places() {
        assert_eq!(Money::new(dec!(1.005)).amount(), dec!(1.01));
        assert_eq!(Money::new(dec!(1.004)).amount(), dec!(1.00));
        assert_eq!(Money::new(dec!(-1.005)).amount(), dec!(-1.01));
    }

    #[test]
    fn unit_cost_keeps_three_places() {
        assert_eq!(round_unit_cost(dec!(0.1235)), dec!(0.124));
        assert_eq!(round_unit_cost(dec!(0.1234)), dec!(0.123));
    }

    #[test]
    fn percent_of_rounds_to_cents() {
        let base = Money::new(dec!(900.00));
        assert_eq!(Percent::new(dec!(5)).of(base), Money::new(dec!(45.00)));
        // 33.33 × 7.5% = 2.49975 → 2.50
        let odd = Money::new(dec!(33.33));
        assert_eq!(Percent::new(dec!(7.5)).of(odd), Money::new(dec!(2.50)));
    }

    #[test]
    fn sum_folds_to_zero_on_empty() {
        let total: Money = core::iter::empty().sum();
        assert_eq!(total, Money::zero());
    }
}
