//! Restaurant Owner API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::error::AppResult;
use shared::models::{MenuItem, MenuItemCreate, MenuItemUpdate, Restaurant, RestaurantUpdate};
use shared::order::{Order, OwnerStats};

use crate::api::extract::ValidJson;
use crate::audit_log;
use crate::auth::CurrentUser;
use crate::state::MockState;

/// GET /owner/restaurants/{id}/orders - newest first
pub async fn orders(
    State(state): State<MockState>,
    current: CurrentUser,
    Path(restaurant_id): Path<String>,
) -> AppResult<Json<Vec<Order>>> {
    current.require_restaurant(&restaurant_id)?;
    Ok(Json(state.store.orders_for_restaurant(&restaurant_id)))
}

/// GET /owner/restaurants/{id}/stats
pub async fn stats(
    State(state): State<MockState>,
    current: CurrentUser,
    Path(restaurant_id): Path<String>,
) -> AppResult<Json<OwnerStats>> {
    current.require_restaurant(&restaurant_id)?;
    let restaurant = state.catalog.restaurant(&restaurant_id).await?;
    let menu_items = state.catalog.menu_for(&restaurant.id).await?.len();
    Ok(Json(state.store.owner_stats(&restaurant.id, menu_items)))
}

/// PUT /owner/restaurants/{id}
pub async fn update_restaurant(
    State(state): State<MockState>,
    current: CurrentUser,
    Path(restaurant_id): Path<String>,
    ValidJson(payload): ValidJson<RestaurantUpdate>,
) -> AppResult<Json<Restaurant>> {
    current.require_restaurant(&restaurant_id)?;
    let restaurant = state.catalog.update_restaurant(&restaurant_id, payload).await?;
    audit_log!(current.id(), "restaurant_updated", format!("restaurant:{restaurant_id}").as_str());
    Ok(Json(restaurant))
}

/// GET /owner/restaurants/{id}/menu - available or not
pub async fn menu(
    State(state): State<MockState>,
    current: CurrentUser,
    Path(restaurant_id): Path<String>,
) -> AppResult<Json<Vec<MenuItem>>> {
    current.require_restaurant(&restaurant_id)?;
    Ok(Json(state.catalog.menu_for(&restaurant_id).await?))
}

/// POST /owner/restaurants/{id}/menu
pub async fn create_menu_item(
    State(state): State<MockState>,
    current: CurrentUser,
    Path(restaurant_id): Path<String>,
    ValidJson(payload): ValidJson<MenuItemCreate>,
) -> AppResult<Json<MenuItem>> {
    current.require_restaurant(&restaurant_id)?;
    let item = state.catalog.create_menu_item(&restaurant_id, payload).await?;
    audit_log!(current.id(), "menu_item_created", format!("menu_item:{}", item.id).as_str());
    Ok(Json(item))
}

/// PUT /owner/menu/{id}
pub async fn update_menu_item(
    State(state): State<MockState>,
    current: CurrentUser,
    Path(id): Path<String>,
    ValidJson(payload): ValidJson<MenuItemUpdate>,
) -> AppResult<Json<MenuItem>> {
    let existing = state.catalog.menu_item(&id).await?;
    current.require_restaurant(&existing.restaurant_id)?;
    let item = state.catalog.update_menu_item(&id, payload).await?;
    audit_log!(current.id(), "menu_item_updated", format!("menu_item:{id}").as_str());
    Ok(Json(item))
}

/// DELETE /owner/menu/{id} - returns the removed item
pub async fn delete_menu_item(
    State(state): State<MockState>,
    current: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<MenuItem>> {
    let existing = state.catalog.menu_item(&id).await?;
    current.require_restaurant(&existing.restaurant_id)?;
    let item = state.catalog.delete_menu_item(&id).await?;
    audit_log!(current.id(), "menu_item_deleted", format!("menu_item:{id}").as_str());
    Ok(Json(item))
}
