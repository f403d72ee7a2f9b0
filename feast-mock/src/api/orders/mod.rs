//! Order API Module
//!
//! Creation, history and status changes. Writes require a signed-in user.

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::MockState;

pub fn router() -> Router<MockState> {
    Router::new().nest("/orders", routes())
}

fn routes() -> Router<MockState> {
    Router::new()
        .route("/", post(handler::create))
        .route("/{id}", get(handler::get_by_id))
        .route("/user/{id}", get(handler::list_for_user))
        .route("/{id}/status", put(handler::update_status))
        .route("/{id}/cancel", post(handler::cancel))
}
