//! Order API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::order::{
    Actor, CancelRequest, CheckoutRequest, Order, StatusUpdateRequest, Transition,
};

use crate::api::extract::{Body, ValidJson};
use crate::audit_log;
use crate::auth::CurrentUser;
use crate::state::MockState;

/// POST /orders
///
/// A repeated `request_id` returns the order created the first time.
pub async fn create(
    State(state): State<MockState>,
    current: CurrentUser,
    ValidJson(mut payload): ValidJson<CheckoutRequest>,
) -> AppResult<Json<Order>> {
    current.require_self(&payload.user_id)?;

    if let Some(request_id) = payload.request_id
        && let Some(existing) = state.store.order_by_request(request_id)
    {
        return Ok(Json(existing));
    }

    let restaurant = state.catalog.restaurant(&payload.restaurant_id).await?;
    if !restaurant.is_active {
        return Err(AppError::with_message(
            ErrorCode::InvalidRequest,
            format!("{} is not accepting orders", restaurant.name),
        )
        .with_detail("restaurant_id", restaurant.id));
    }

    for line in &payload.items {
        let item = state.catalog.menu_item(&line.menu_item_id).await?;
        if item.restaurant_id != restaurant.id {
            return Err(AppError::new(ErrorCode::OrderMixedRestaurants)
                .with_detail("menu_item_id", item.id));
        }
        if !item.is_available {
            return Err(AppError::validation(format!("{} is currently unavailable", item.name))
                .with_detail("menu_item_id", item.id));
        }
    }
    payload.restaurant_name = Some(restaurant.name);

    let created = state.store.create_order(&payload, state.now())?;
    if !created.replayed {
        audit_log!(
            current.id(),
            "order_created",
            format!("order:{}", created.order.id).as_str(),
            format!("total={}", created.order.total_amount).as_str()
        );
    }
    Ok(Json(created.order))
}

/// GET /orders/{id} - the customer, the restaurant's owner or an admin
pub async fn get_by_id(
    State(state): State<MockState>,
    current: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    let order = state.store.order(&id)?;
    actor_for(&current, &order)?;
    Ok(Json(order))
}

/// GET /orders/user/{id} - newest first
pub async fn list_for_user(
    State(state): State<MockState>,
    current: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<Order>>> {
    current.require_self(&id)?;
    Ok(Json(state.store.orders_for_user(&id)))
}

/// The actor a caller acts as on `order`, or an error if they may not
/// touch it at all
fn actor_for(current: &CurrentUser, order: &Order) -> AppResult<Actor> {
    let user = &current.0;
    if user.is_admin() {
        return Ok(Actor::Admin);
    }
    if user.owns_restaurant(&order.restaurant_id) {
        return Ok(Actor::Restaurant);
    }
    if user.id == order.user_id {
        return Ok(Actor::Customer);
    }
    Err(AppError::permission_denied(format!(
        "Not allowed to access order {}",
        order.id
    )))
}

/// PUT /orders/{id}/status
pub async fn update_status(
    State(state): State<MockState>,
    current: CurrentUser,
    Path(id): Path<String>,
    Body(payload): Body<StatusUpdateRequest>,
) -> AppResult<Json<Order>> {
    let actor = actor_for(&current, &state.store.order(&id)?)?;
    let (order, transition) =
        state
            .store
            .update_order_status(&id, payload.status, actor, state.now())?;

    if transition == Transition::Changed {
        audit_log!(
            current.id(),
            "order_status_changed",
            format!("order:{id}").as_str(),
            format!("{} by {actor}", order.status).as_str()
        );
    }
    Ok(Json(order))
}

/// POST /orders/{id}/cancel
///
/// The actor recorded on the cancellation comes from the caller's role;
/// a `cancelled_by` in the body is only honoured for admins.
pub async fn cancel(
    State(state): State<MockState>,
    current: CurrentUser,
    Path(id): Path<String>,
    Body(payload): Body<CancelRequest>,
) -> AppResult<Json<Order>> {
    let mut actor = actor_for(&current, &state.store.order(&id)?)?;
    if actor == Actor::Admin
        && let Some(claimed) = payload.cancelled_by
    {
        actor = claimed;
    }

    let reason = match payload.reason.trim() {
        "" => format!("Cancelled by {actor}"),
        r => r.to_string(),
    };
    let (order, transition) = state.store.cancel_order(&id, &reason, actor, state.now())?;

    if transition == Transition::Changed {
        audit_log!(
            current.id(),
            "order_cancelled",
            format!("order:{id}").as_str(),
            reason.as_str()
        );
    }
    Ok(Json(order))
}
