//! Review API Module

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::MockState;

pub fn router() -> Router<MockState> {
    Router::new()
        .route("/reviews", post(handler::create))
        .route("/users/{id}/reviews", get(handler::list_for_user))
}
