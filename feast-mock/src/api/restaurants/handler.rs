//! Restaurant API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use shared::error::AppResult;
use shared::models::{Restaurant, RestaurantFilter, Review};

use crate::state::MockState;

/// GET /restaurants?city=&cuisine=&search=
pub async fn list(
    State(state): State<MockState>,
    Query(filter): Query<RestaurantFilter>,
) -> AppResult<Json<Vec<Restaurant>>> {
    let restaurants = state.catalog.restaurants(&filter).await?;
    Ok(Json(restaurants))
}

/// GET /restaurants/{id}
pub async fn get_by_id(
    State(state): State<MockState>,
    Path(id): Path<String>,
) -> AppResult<Json<Restaurant>> {
    Ok(Json(state.catalog.restaurant(&id).await?))
}

/// GET /restaurants/{id}/reviews - newest first
pub async fn reviews(
    State(state): State<MockState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<Review>>> {
    Ok(Json(state.store.reviews_for_restaurant(&id)))
}
