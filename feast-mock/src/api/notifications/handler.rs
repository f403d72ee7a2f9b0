//! Notification API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::client::SuccessResponse;
use shared::error::AppResult;
use shared::models::Notification;

use crate::auth::CurrentUser;
use crate::state::MockState;

/// GET /users/{id}/notifications - newest first
pub async fn list(
    State(state): State<MockState>,
    current: CurrentUser,
    Path(user_id): Path<String>,
) -> AppResult<Json<Vec<Notification>>> {
    current.require_self(&user_id)?;
    Ok(Json(state.store.notifications_for_user(&user_id)))
}

/// PUT /notifications/{id}/read
pub async fn mark_read(
    State(state): State<MockState>,
    current: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Notification>> {
    current.require_self(&state.store.notification(&id)?.user_id)?;
    Ok(Json(state.store.mark_notification_read(&id)?))
}

/// PUT /users/{id}/notifications/read-all
pub async fn mark_all_read(
    State(state): State<MockState>,
    current: CurrentUser,
    Path(user_id): Path<String>,
) -> AppResult<Json<SuccessResponse>> {
    current.require_self(&user_id)?;
    let changed = state.store.mark_all_notifications_read(&user_id);
    tracing::debug!(%user_id, changed, "Marked notifications read");
    Ok(Json(SuccessResponse::OK))
}
