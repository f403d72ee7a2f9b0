//! Admin API Module
//!
//! Every route requires an admin token.

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::state::MockState;

pub fn router() -> Router<MockState> {
    Router::new().nest("/admin", routes())
}

fn routes() -> Router<MockState> {
    Router::new()
        .route("/orders", get(handler::orders))
        .route("/stats", get(handler::stats))
        .route("/users", get(handler::users))
        .route("/users/{id}/status", put(handler::set_user_status))
        .route("/restaurants", get(handler::restaurants))
        .route("/restaurants/{id}/status", put(handler::set_restaurant_status))
}
