//! User Account API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::client::SuccessResponse;
use shared::error::AppResult;
use shared::models::{
    PasswordChange, ProfileUpdate, TopUpRequest, Transaction, User, WalletBalance,
};

use crate::api::extract::{Body, ValidJson};
use crate::audit_log;
use crate::auth::CurrentUser;
use crate::state::MockState;

/// GET /users/{id}/profile
pub async fn profile(
    State(state): State<MockState>,
    current: CurrentUser,
    Path(user_id): Path<String>,
) -> AppResult<Json<User>> {
    current.require_self(&user_id)?;
    Ok(Json(state.store.user(&user_id)?))
}

/// PUT /users/{id}/profile - name, phone and picture only
pub async fn update_profile(
    State(state): State<MockState>,
    current: CurrentUser,
    Path(user_id): Path<String>,
    ValidJson(payload): ValidJson<ProfileUpdate>,
) -> AppResult<Json<User>> {
    current.require_self(&user_id)?;
    Ok(Json(state.store.update_profile(&user_id, payload)?))
}

/// PUT /users/{id}/password
pub async fn change_password(
    State(state): State<MockState>,
    current: CurrentUser,
    Path(user_id): Path<String>,
    ValidJson(payload): ValidJson<PasswordChange>,
) -> AppResult<Json<SuccessResponse>> {
    current.require_self(&user_id)?;
    state.store.change_password(&user_id, &payload)?;
    audit_log!(current.id(), "password_changed", format!("user:{user_id}").as_str());
    Ok(Json(SuccessResponse::OK))
}

/// GET /users/{id}/wallet
pub async fn wallet(
    State(state): State<MockState>,
    current: CurrentUser,
    Path(user_id): Path<String>,
) -> AppResult<Json<WalletBalance>> {
    current.require_self(&user_id)?;
    Ok(Json(state.store.wallet(&user_id)?))
}

/// POST /users/{id}/wallet/top-up
pub async fn top_up(
    State(state): State<MockState>,
    current: CurrentUser,
    Path(user_id): Path<String>,
    Body(payload): Body<TopUpRequest>,
) -> AppResult<Json<WalletBalance>> {
    current.require_self(&user_id)?;
    Ok(Json(state.store.top_up(&user_id, &payload, state.now())?))
}

/// GET /users/{id}/transactions - newest first
pub async fn transactions(
    State(state): State<MockState>,
    current: CurrentUser,
    Path(user_id): Path<String>,
) -> AppResult<Json<Vec<Transaction>>> {
    current.require_self(&user_id)?;
    Ok(Json(state.store.transactions_for_user(&user_id)))
}
