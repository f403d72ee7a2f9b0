//! Notification API Module

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::state::MockState;

pub fn router() -> Router<MockState> {
    Router::new()
        .route("/users/{id}/notifications", get(handler::list))
        .route(
            "/users/{id}/notifications/read-all",
            put(handler::mark_all_read),
        )
        .route("/notifications/{id}/read", put(handler::mark_read))
}
