//! Address API Handlers
//!
//! Callers may only touch their own addresses; admins may touch any.

use axum::{
    Json,
    extract::{Path, State},
};
use shared::client::SuccessResponse;
use shared::error::AppResult;
use shared::models::{Address, AddressCreate, AddressUpdate};

use crate::api::extract::ValidJson;
use crate::auth::CurrentUser;
use crate::state::MockState;

/// GET /users/{id}/addresses
pub async fn list(
    State(state): State<MockState>,
    current: CurrentUser,
    Path(user_id): Path<String>,
) -> AppResult<Json<Vec<Address>>> {
    current.require_self(&user_id)?;
    Ok(Json(state.store.addresses_for_user(&user_id)))
}

/// POST /users/{id}/addresses
pub async fn create(
    State(state): State<MockState>,
    current: CurrentUser,
    Path(user_id): Path<String>,
    ValidJson(payload): ValidJson<AddressCreate>,
) -> AppResult<Json<Address>> {
    current.require_self(&user_id)?;
    Ok(Json(state.store.create_address(&user_id, payload)))
}

/// PUT /addresses/{id}
pub async fn update(
    State(state): State<MockState>,
    current: CurrentUser,
    Path(id): Path<String>,
    ValidJson(payload): ValidJson<AddressUpdate>,
) -> AppResult<Json<Address>> {
    current.require_self(&state.store.address(&id)?.user_id)?;
    Ok(Json(state.store.update_address(&id, payload)?))
}

/// DELETE /addresses/{id}
pub async fn delete(
    State(state): State<MockState>,
    current: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<SuccessResponse>> {
    current.require_self(&state.store.address(&id)?.user_id)?;
    state.store.delete_address(&id)?;
    Ok(Json(SuccessResponse::OK))
}
