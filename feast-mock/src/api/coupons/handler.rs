//! Coupon API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::coupon::{Coupon, CouponValidateRequest, CouponValidation};
use shared::error::AppResult;

use crate::api::extract::Body;
use crate::state::MockState;

/// GET /coupons - coupons redeemable today
pub async fn list(State(state): State<MockState>) -> Json<Vec<Coupon>> {
    Json(state.store.active_coupons(state.today()))
}

/// POST /coupons/{code}/validate
///
/// Validation never consumes the coupon.
pub async fn validate(
    State(state): State<MockState>,
    Path(code): Path<String>,
    Body(payload): Body<CouponValidateRequest>,
) -> AppResult<Json<CouponValidation>> {
    let validation = state.store.validate_coupon(
        &code,
        &payload.user_id,
        payload.order_amount,
        state.today(),
    )?;
    Ok(Json(validation))
}
