use chrono::NaiveDate;
use rust_decimal::Decimal;
use shared::coupon::{self, Coupon, CouponContext, CouponValidation};
use shared::error::AppResult;

use super::MockStore;

impl MockStore {
    /// Coupons that can be redeemed on `today`
    pub fn active_coupons(&self, today: NaiveDate) -> Vec<Coupon> {
        self.coupons
            .read()
            .iter()
            .filter(|c| c.is_usable_on(today))
            .cloned()
            .collect()
    }

    /// Check a coupon for a prospective order without consuming it
    pub fn validate_coupon(
        &self,
        code: &str,
        user_id: &str,
        order_amount: Decimal,
        today: NaiveDate,
    ) -> AppResult<CouponValidation> {
        let ctx = CouponContext {
            user_id: user_id.to_string(),
            order_amount,
            prior_order_count: self.prior_order_count(user_id),
            delivery_fee: self.fees.delivery_fee,
            today,
        };
        Ok(coupon::validate(&self.coupons.read(), code, &ctx)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::error::ErrorCode;
    use shared::order::FeeSchedule;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, 1).unwrap()
    }

    fn d(v: &str) -> Decimal {
        v.parse().unwrap()
    }

    #[test]
    fn test_seeded_coupons() {
        let store = MockStore::seeded(FeeSchedule::default()).unwrap();
        let active = store.active_coupons(today());
        assert!(active.iter().any(|c| c.code == "SAVE20"));

        let v = store
            .validate_coupon("save20", "user_003", d("100"), today())
            .unwrap();
        assert!(v.valid);
        // 20% of 100 capped at 15
        assert_eq!(v.discount, d("15"));

        let v = store
            .validate_coupon("FREESHIP", "user_003", d("25"), today())
            .unwrap();
        assert_eq!(v.discount, store.fees().delivery_fee);
    }

    #[test]
    fn test_new_user_coupon_rejects_returning_customer() {
        let store = MockStore::seeded(FeeSchedule::default()).unwrap();
        let err = store
            .validate_coupon("FIRST50", "user_001", d("100"), today())
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::CouponNotEligible);

        assert!(store
            .validate_coupon("FIRST50", "user_003", d("100"), today())
            .is_ok());
    }

    #[test]
    fn test_below_minimum_and_unknown() {
        let store = MockStore::seeded(FeeSchedule::default()).unwrap();
        let err = store
            .validate_coupon("SAVE20", "user_003", d("5"), today())
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::CouponBelowMinimum);

        let err = store
            .validate_coupon("NOPE", "user_003", d("100"), today())
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::CouponInvalid);
    }
}
