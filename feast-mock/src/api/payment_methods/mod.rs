//! Payment Method API Module
//!
//! Display-only records; nothing is charged.

mod handler;

use axum::{
    Router,
    routing::{delete, get},
};

use crate::state::MockState;

pub fn router() -> Router<MockState> {
    Router::new()
        .route(
            "/users/{id}/payment-methods",
            get(handler::list).post(handler::create),
        )
        .route("/payment-methods/{id}", delete(handler::delete))
}
