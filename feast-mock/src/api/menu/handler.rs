//! Menu API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::error::AppResult;
use shared::models::MenuItem;

use crate::state::MockState;

/// GET /menu
pub async fn list(State(state): State<MockState>) -> AppResult<Json<Vec<MenuItem>>> {
    Ok(Json(state.catalog.menu().await?))
}

/// GET /menu/{id}
pub async fn get_by_id(
    State(state): State<MockState>,
    Path(id): Path<String>,
) -> AppResult<Json<MenuItem>> {
    Ok(Json(state.catalog.menu_item(&id).await?))
}

/// GET /menu/restaurant/{id}
pub async fn for_restaurant(
    State(state): State<MockState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<MenuItem>>> {
    Ok(Json(state.catalog.menu_for(&id).await?))
}
