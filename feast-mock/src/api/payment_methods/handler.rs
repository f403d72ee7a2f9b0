//! Payment Method API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::client::SuccessResponse;
use shared::error::AppResult;
use shared::models::{PaymentMethod, PaymentMethodCreate};

use crate::api::extract::ValidJson;
use crate::auth::CurrentUser;
use crate::state::MockState;

/// GET /users/{id}/payment-methods
pub async fn list(
    State(state): State<MockState>,
    current: CurrentUser,
    Path(user_id): Path<String>,
) -> AppResult<Json<Vec<PaymentMethod>>> {
    current.require_self(&user_id)?;
    Ok(Json(state.store.payment_methods_for_user(&user_id)))
}

/// POST /users/{id}/payment-methods
pub async fn create(
    State(state): State<MockState>,
    current: CurrentUser,
    Path(user_id): Path<String>,
    ValidJson(payload): ValidJson<PaymentMethodCreate>,
) -> AppResult<Json<PaymentMethod>> {
    current.require_self(&user_id)?;
    Ok(Json(state.store.create_payment_method(&user_id, payload)))
}

/// DELETE /payment-methods/{id}
pub async fn delete(
    State(state): State<MockState>,
    current: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<SuccessResponse>> {
    current.require_self(&state.store.payment_method(&id)?.user_id)?;
    state.store.delete_payment_method(&id)?;
    Ok(Json(SuccessResponse::OK))
}
