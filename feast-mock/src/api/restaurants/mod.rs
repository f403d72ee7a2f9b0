//! Restaurant API Module

mod handler;

use axum::{Router, routing::get};

use crate::state::MockState;

pub fn router() -> Router<MockState> {
    Router::new().nest("/restaurants", routes())
}

fn routes() -> Router<MockState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/reviews", get(handler::reviews))
}
