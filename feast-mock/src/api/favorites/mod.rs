//! Favorite API Module

mod handler;

use axum::{
    Router,
    routing::{delete, get},
};

use crate::state::MockState;

pub fn router() -> Router<MockState> {
    Router::new()
        .route(
            "/users/{id}/favorites",
            get(handler::list).post(handler::add),
        )
        .route(
            "/users/{id}/favorites/{restaurant_id}",
            delete(handler::remove),
        )
}
