//! Coupon definitions and discount engine

mod engine;

pub use engine::{CouponContext, CouponError, CouponValidation, discount_for, validate};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How a coupon reduces the order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountType {
    /// `discount_value` percent of the order amount, clamped to `max_discount`
    Percentage,
    /// Flat `discount_value`, never more than the order amount
    Fixed,
    /// Waives the delivery fee
    FreeDelivery,
}

/// Coupon entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coupon {
    pub id: String,
    /// Unique, matched case-insensitively
    pub code: String,
    pub description: String,
    #[serde(rename = "type")]
    pub discount_type: DiscountType,
    #[serde(rename = "discount", with = "rust_decimal::serde::float")]
    pub discount_value: Decimal,
    #[serde(rename = "min_order", with = "rust_decimal::serde::float")]
    pub min_order_amount: Decimal,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_discount: Option<Decimal>,
    #[serde(default)]
    pub new_users_only: bool,
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_from: Option<NaiveDate>,
    /// Last day the coupon can be used
    #[serde(rename = "expiry", default, skip_serializing_if = "Option::is_none")]
    pub expires_on: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_limit: Option<u32>,
    #[serde(default)]
    pub used_count: u32,
}

impl Coupon {
    pub fn matches_code(&self, code: &str) -> bool {
        self.code.eq_ignore_ascii_case(code.trim())
    }

    /// Active flag, date window and usage limit all allow use on `today`
    pub fn is_usable_on(&self, today: NaiveDate) -> bool {
        if !self.active {
            return false;
        }
        if self.valid_from.is_some_and(|from| today < from) {
            return false;
        }
        if self.expires_on.is_some_and(|until| today > until) {
            return false;
        }
        if self.usage_limit.is_some_and(|limit| self.used_count >= limit) {
            return false;
        }
        true
    }

    /// Count one redemption; called only when an order is created
    pub fn record_use(&mut self) {
        self.used_count = self.used_count.saturating_add(1);
    }
}

/// Body of `POST /coupons/{code}/validate`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouponValidateRequest {
    pub user_id: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub order_amount: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coupon() -> Coupon {
        Coupon {
            id: "COUP_001".to_string(),
            code: "SAVE20".to_string(),
            description: "20% off".to_string(),
            discount_type: DiscountType::Percentage,
            discount_value: Decimal::from(20),
            min_order_amount: Decimal::from(30),
            max_discount: Some(Decimal::from(15)),
            new_users_only: false,
            active: true,
            valid_from: None,
            expires_on: NaiveDate::from_ymd_opt(2025, 12, 31),
            usage_limit: Some(2),
            used_count: 0,
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_code_match_ignores_case() {
        assert!(coupon().matches_code("save20"));
        assert!(coupon().matches_code(" Save20 "));
        assert!(!coupon().matches_code("SAVE2"));
    }

    #[test]
    fn test_expiry_is_inclusive() {
        let c = coupon();
        assert!(c.is_usable_on(day(2025, 12, 31)));
        assert!(!c.is_usable_on(day(2026, 1, 1)));
    }

    #[test]
    fn test_usage_limit() {
        let mut c = coupon();
        c.record_use();
        assert!(c.is_usable_on(day(2025, 6, 1)));
        c.record_use();
        assert!(!c.is_usable_on(day(2025, 6, 1)));
    }

    #[test]
    fn test_wire_shape() {
        let json = serde_json::to_value(coupon()).unwrap();
        assert_eq!(json["type"], "percentage");
        assert_eq!(json["discount"], 20.0);
        assert_eq!(json["min_order"], 30.0);
        assert_eq!(json["expiry"], "2025-12-31");
    }
}
