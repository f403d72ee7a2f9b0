//! Favorite API Handlers
//!
//! Every endpoint answers with the user's full favorite id list.

use axum::{
    Json,
    extract::{Path, State},
};
use shared::error::AppResult;
use shared::models::FavoriteAdd;

use crate::api::extract::Body;
use crate::auth::CurrentUser;
use crate::state::MockState;

/// GET /users/{id}/favorites
pub async fn list(
    State(state): State<MockState>,
    current: CurrentUser,
    Path(user_id): Path<String>,
) -> AppResult<Json<Vec<String>>> {
    current.require_self(&user_id)?;
    Ok(Json(state.store.favorites(&user_id)))
}

/// POST /users/{id}/favorites
pub async fn add(
    State(state): State<MockState>,
    current: CurrentUser,
    Path(user_id): Path<String>,
    Body(payload): Body<FavoriteAdd>,
) -> AppResult<Json<Vec<String>>> {
    current.require_self(&user_id)?;
    let restaurant = state.catalog.restaurant(&payload.restaurant_id).await?;
    Ok(Json(state.store.add_favorite(&user_id, &restaurant.id)))
}

/// DELETE /users/{id}/favorites/{restaurant_id}
pub async fn remove(
    State(state): State<MockState>,
    current: CurrentUser,
    Path((user_id, restaurant_id)): Path<(String, String)>,
) -> AppResult<Json<Vec<String>>> {
    current.require_self(&user_id)?;
    Ok(Json(state.store.remove_favorite(&user_id, &restaurant_id)))
}
