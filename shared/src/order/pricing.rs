//! Money arithmetic for order totals
//!
//! All amounts are `Decimal`. Stored amounts are rounded to cents with
//! midpoint-away-from-zero; intermediate sums keep full precision.

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

/// Rounding for monetary values (2 decimal places, half away from zero)
const DECIMAL_PLACES: u32 = 2;

/// Tolerance for monetary comparisons (0.01)
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Flat delivery fee charged per order
pub const DEFAULT_DELIVERY_FEE: Decimal = Decimal::from_parts(49, 0, 0, false, 0);

/// Tax rate applied to the subtotal (5%)
pub const DEFAULT_TAX_RATE: Decimal = Decimal::from_parts(5, 0, 0, false, 2);

/// Round a monetary value to cents
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Compare two monetary values for equality (within 0.01 tolerance)
pub fn money_eq(a: Decimal, b: Decimal) -> bool {
    (a - b).abs() < MONEY_TOLERANCE
}

/// Delivery fee and tax rate used to price an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSchedule {
    #[serde(with = "rust_decimal::serde::float")]
    pub delivery_fee: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax_rate: Decimal,
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            delivery_fee: DEFAULT_DELIVERY_FEE,
            tax_rate: DEFAULT_TAX_RATE,
        }
    }
}

impl FeeSchedule {
    /// Tax on a subtotal, rounded to cents
    pub fn tax_on(&self, subtotal: Decimal) -> Decimal {
        round_money(subtotal * self.tax_rate)
    }
}

/// Priced breakdown of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderTotals {
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub delivery_fee: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub discount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
}

impl OrderTotals {
    /// Price lines of `(unit price, quantity)`
    ///
    /// Tax is charged on the undiscounted subtotal. The discount is clamped
    /// so the total never goes below zero.
    pub fn compute(
        lines: impl IntoIterator<Item = (Decimal, u32)>,
        schedule: &FeeSchedule,
        discount: Decimal,
    ) -> Self {
        let raw_subtotal: Decimal = lines
            .into_iter()
            .map(|(price, qty)| price * Decimal::from(qty))
            .sum();
        let subtotal = round_money(raw_subtotal);
        let delivery_fee = round_money(schedule.delivery_fee);
        let tax_amount = schedule.tax_on(raw_subtotal);
        let gross = subtotal + delivery_fee + tax_amount;
        let discount = round_money(discount.max(Decimal::ZERO)).min(gross);

        Self {
            subtotal,
            delivery_fee,
            discount,
            tax_amount,
            total_amount: gross - discount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(v: &str) -> Decimal {
        v.parse().unwrap()
    }

    #[test]
    fn test_default_schedule_two_lines() {
        let totals = OrderTotals::compute(
            [(d("12.99"), 2), (d("9.99"), 1)],
            &FeeSchedule::default(),
            Decimal::ZERO,
        );
        assert_eq!(totals.subtotal, d("35.97"));
        assert_eq!(totals.delivery_fee, d("49"));
        assert_eq!(totals.tax_amount, d("1.80"));
        assert_eq!(totals.total_amount, d("86.77"));
    }

    #[test]
    fn test_discount_reduces_total() {
        let totals = OrderTotals::compute([(d("40"), 1)], &FeeSchedule::default(), d("8"));
        // 40 + 49 + 2 - 8
        assert_eq!(totals.total_amount, d("83"));
        assert_eq!(totals.discount, d("8"));
    }

    #[test]
    fn test_discount_clamped_to_zero_total() {
        let totals = OrderTotals::compute([(d("5"), 1)], &FeeSchedule::default(), d("1000"));
        assert_eq!(totals.total_amount, Decimal::ZERO);
        assert_eq!(totals.discount, d("54.25"));
    }

    #[test]
    fn test_negative_discount_ignored() {
        let totals = OrderTotals::compute([(d("10"), 1)], &FeeSchedule::default(), d("-3"));
        assert_eq!(totals.discount, Decimal::ZERO);
    }

    #[test]
    fn test_rounding_half_up() {
        assert_eq!(round_money(d("0.005")), d("0.01"));
        assert_eq!(round_money(d("0.004")), d("0.00"));
        assert_eq!(round_money(d("-0.005")), d("-0.01"));
    }

    #[test]
    fn test_many_small_items_no_drift() {
        let lines = (0..100).map(|_| (d("0.10"), 1));
        let zero_fee = FeeSchedule {
            delivery_fee: Decimal::ZERO,
            tax_rate: Decimal::ZERO,
        };
        let totals = OrderTotals::compute(lines, &zero_fee, Decimal::ZERO);
        assert_eq!(totals.total_amount, d("10.00"));
    }

    #[test]
    fn test_money_eq() {
        assert!(money_eq(d("1.001"), d("1.00")));
        assert!(!money_eq(d("1.01"), d("1.00")));
    }
}
