//! Coupon validation and discount computation
//!
//! Pure functions: validating a coupon never changes its usage count.

use super::{Coupon, DiscountType};
use crate::error::{AppError, ErrorCode};
use crate::order::pricing::round_money;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Inputs that decide whether a coupon applies
#[derive(Debug, Clone)]
pub struct CouponContext {
    pub user_id: String,
    pub order_amount: Decimal,
    /// Orders the user placed before this one
    pub prior_order_count: usize,
    pub delivery_fee: Decimal,
    pub today: NaiveDate,
}

/// Successful validation: the coupon and the discount it yields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CouponValidation {
    pub valid: bool,
    pub coupon: Coupon,
    #[serde(with = "rust_decimal::serde::float")]
    pub discount: Decimal,
}

/// Coupon rejection reasons
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CouponError {
    #[error("Invalid coupon code")]
    InvalidCoupon { code: String },

    #[error("Minimum order amount is {minimum}")]
    BelowMinimum { minimum: Decimal },

    #[error("This coupon is only valid for new users")]
    NotEligible,
}

impl CouponError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidCoupon { .. } => ErrorCode::CouponInvalid,
            Self::BelowMinimum { .. } => ErrorCode::CouponBelowMinimum,
            Self::NotEligible => ErrorCode::CouponNotEligible,
        }
    }
}

impl From<CouponError> for AppError {
    fn from(err: CouponError) -> Self {
        let app = AppError::with_message(err.code(), err.to_string());
        match err {
            CouponError::InvalidCoupon { code } => app.with_detail("code", code),
            CouponError::BelowMinimum { minimum } => {
                app.with_detail("min_order_amount", minimum.to_string())
            }
            CouponError::NotEligible => app,
        }
    }
}

/// Validate `code` against `coupons` and compute its discount
pub fn validate(
    coupons: &[Coupon],
    code: &str,
    ctx: &CouponContext,
) -> Result<CouponValidation, CouponError> {
    let coupon = coupons
        .iter()
        .find(|c| c.matches_code(code))
        .filter(|c| c.is_usable_on(ctx.today))
        .ok_or_else(|| CouponError::InvalidCoupon {
            code: code.trim().to_string(),
        })?;

    if ctx.order_amount < coupon.min_order_amount {
        return Err(CouponError::BelowMinimum {
            minimum: coupon.min_order_amount.round_dp(2),
        });
    }

    if coupon.new_users_only && ctx.prior_order_count >= 1 {
        return Err(CouponError::NotEligible);
    }

    Ok(CouponValidation {
        valid: true,
        discount: discount_for(coupon, ctx.order_amount, ctx.delivery_fee),
        coupon: coupon.clone(),
    })
}

/// Discount a coupon yields, rounded to cents
pub fn discount_for(coupon: &Coupon, order_amount: Decimal, delivery_fee: Decimal) -> Decimal {
    let raw = match coupon.discount_type {
        DiscountType::Percentage => {
            let pct = order_amount * coupon.discount_value / Decimal::ONE_HUNDRED;
            match coupon.max_discount {
                Some(cap) => pct.min(cap),
                None => pct,
            }
        }
        DiscountType::Fixed => coupon.discount_value.min(order_amount),
        DiscountType::FreeDelivery => delivery_fee,
    };
    round_money(raw.max(Decimal::ZERO))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(v: &str) -> Decimal {
        v.parse().unwrap()
    }

    fn coupon(code: &str, kind: DiscountType, value: &str, min: &str, cap: Option<&str>) -> Coupon {
        Coupon {
            id: format!("COUP_{code}"),
            code: code.to_string(),
            description: String::new(),
            discount_type: kind,
            discount_value: d(value),
            min_order_amount: d(min),
            max_discount: cap.map(d),
            new_users_only: false,
            active: true,
            valid_from: None,
            expires_on: NaiveDate::from_ymd_opt(2025, 12, 31),
            usage_limit: Some(1000),
            used_count: 0,
        }
    }

    fn catalog() -> Vec<Coupon> {
        let mut first50 = coupon("FIRST50", DiscountType::Percentage, "50", "25", Some("25"));
        first50.new_users_only = true;
        vec![
            coupon("SAVE20", DiscountType::Percentage, "20", "30", Some("15")),
            coupon("FLAT10", DiscountType::Fixed, "10", "20", None),
            first50,
            coupon("FREESHIP", DiscountType::FreeDelivery, "0", "25", None),
        ]
    }

    fn ctx(amount: &str, prior: usize) -> CouponContext {
        CouponContext {
            user_id: "user_001".to_string(),
            order_amount: d(amount),
            prior_order_count: prior,
            delivery_fee: d("49"),
            today: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        }
    }

    #[test]
    fn test_percentage_discount() {
        let v = validate(&catalog(), "SAVE20", &ctx("40", 0)).unwrap();
        assert!(v.valid);
        assert_eq!(v.discount, d("8.00"));
    }

    #[test]
    fn test_percentage_clamped_to_cap() {
        let v = validate(&catalog(), "SAVE20", &ctx("100", 0)).unwrap();
        assert_eq!(v.discount, d("15"));
    }

    #[test]
    fn test_lowercase_code() {
        let v = validate(&catalog(), "flat10", &ctx("50", 3)).unwrap();
        assert_eq!(v.coupon.code, "FLAT10");
        assert_eq!(v.discount, d("10"));
    }

    #[test]
    fn test_below_minimum_reports_minimum() {
        let err = validate(&catalog(), "SAVE20", &ctx("29.99", 0)).unwrap_err();
        assert_eq!(err, CouponError::BelowMinimum { minimum: d("30") });
        let app: AppError = err.into();
        assert_eq!(app.code, ErrorCode::CouponBelowMinimum);
        assert!(app.message.contains("30"));
    }

    #[test]
    fn test_new_users_only() {
        assert!(validate(&catalog(), "FIRST50", &ctx("40", 0)).is_ok());
        let err = validate(&catalog(), "FIRST50", &ctx("40", 1)).unwrap_err();
        assert_eq!(err, CouponError::NotEligible);
        assert_eq!(err.code(), ErrorCode::CouponNotEligible);
    }

    #[test]
    fn test_free_delivery_equals_fee() {
        let v = validate(&catalog(), "FREESHIP", &ctx("30", 0)).unwrap();
        assert_eq!(v.discount, d("49"));
    }

    #[test]
    fn test_unknown_inactive_expired_exhausted() {
        let mut coupons = catalog();
        assert!(matches!(
            validate(&coupons, "NOPE", &ctx("100", 0)),
            Err(CouponError::InvalidCoupon { .. })
        ));

        coupons[1].active = false;
        assert!(matches!(
            validate(&coupons, "FLAT10", &ctx("100", 0)),
            Err(CouponError::InvalidCoupon { .. })
        ));

        let mut late = ctx("100", 0);
        late.today = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        assert!(matches!(
            validate(&coupons, "SAVE20", &late),
            Err(CouponError::InvalidCoupon { .. })
        ));

        coupons[0].used_count = 1000;
        assert!(matches!(
            validate(&coupons, "SAVE20", &ctx("100", 0)),
            Err(CouponError::InvalidCoupon { .. })
        ));
    }

    #[test]
    fn test_validation_does_not_touch_usage() {
        let coupons = catalog();
        let _ = validate(&coupons, "SAVE20", &ctx("40", 0)).unwrap();
        assert_eq!(coupons[0].used_count, 0);
    }

    #[test]
    fn test_fixed_never_exceeds_order_amount() {
        let c = coupon("BIG", DiscountType::Fixed, "50", "0", None);
        assert_eq!(discount_for(&c, d("12.5"), d("49")), d("12.50"));
    }

    #[test]
    fn test_discount_rounding_half_away() {
        // 15% of 10.10 = 1.515
        let c = coupon("P15", DiscountType::Percentage, "15", "0", None);
        assert_eq!(discount_for(&c, d("10.10"), Decimal::ZERO), d("1.52"));
    }
}
