//! Admin API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::error::AppResult;
use shared::models::{Restaurant, RestaurantFilter, RestaurantStatusUpdate, User, UserStatusUpdate};
use shared::order::{Order, OrderStats};

use crate::api::extract::Body;
use crate::audit_log;
use crate::auth::CurrentUser;
use crate::state::MockState;

/// GET /admin/orders - newest first
pub async fn orders(
    State(state): State<MockState>,
    current: CurrentUser,
) -> AppResult<Json<Vec<Order>>> {
    current.require_admin()?;
    Ok(Json(state.store.all_orders()))
}

/// GET /admin/stats
pub async fn stats(
    State(state): State<MockState>,
    current: CurrentUser,
) -> AppResult<Json<OrderStats>> {
    current.require_admin()?;
    Ok(Json(state.store.order_stats()))
}

/// GET /admin/users
pub async fn users(
    State(state): State<MockState>,
    current: CurrentUser,
) -> AppResult<Json<Vec<User>>> {
    current.require_admin()?;
    Ok(Json(state.store.users()))
}

/// PUT /admin/users/{id}/status
pub async fn set_user_status(
    State(state): State<MockState>,
    current: CurrentUser,
    Path(id): Path<String>,
    Body(payload): Body<UserStatusUpdate>,
) -> AppResult<Json<User>> {
    current.require_admin()?;
    let user = state.store.set_user_active(&id, payload.is_active)?;
    audit_log!(
        current.id(),
        if payload.is_active { "user_activated" } else { "user_deactivated" },
        format!("user:{id}").as_str()
    );
    Ok(Json(user))
}

/// GET /admin/restaurants - open and closed
pub async fn restaurants(
    State(state): State<MockState>,
    current: CurrentUser,
) -> AppResult<Json<Vec<Restaurant>>> {
    current.require_admin()?;
    Ok(Json(state.catalog.restaurants(&RestaurantFilter::default()).await?))
}

/// PUT /admin/restaurants/{id}/status
pub async fn set_restaurant_status(
    State(state): State<MockState>,
    current: CurrentUser,
    Path(id): Path<String>,
    Body(payload): Body<RestaurantStatusUpdate>,
) -> AppResult<Json<Restaurant>> {
    current.require_admin()?;
    let restaurant = state.catalog.set_restaurant_active(&id, payload.is_active).await?;
    audit_log!(
        current.id(),
        if payload.is_active { "restaurant_opened" } else { "restaurant_closed" },
        format!("restaurant:{id}").as_str()
    );
    Ok(Json(restaurant))
}
