//! Review API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::error::AppResult;
use shared::models::{Review, ReviewCreate};

use crate::api::extract::ValidJson;
use crate::auth::CurrentUser;
use crate::state::MockState;

/// POST /reviews - ratings must be 1..=5, posted as the caller
pub async fn create(
    State(state): State<MockState>,
    current: CurrentUser,
    ValidJson(payload): ValidJson<ReviewCreate>,
) -> AppResult<Json<Review>> {
    current.require_self(&payload.user_id)?;
    state.catalog.restaurant(&payload.restaurant_id).await?;
    Ok(Json(state.store.create_review(payload)))
}

/// GET /users/{id}/reviews
pub async fn list_for_user(
    State(state): State<MockState>,
    current: CurrentUser,
    Path(user_id): Path<String>,
) -> AppResult<Json<Vec<Review>>> {
    current.require_self(&user_id)?;
    Ok(Json(state.store.reviews_for_user(&user_id)))
}
