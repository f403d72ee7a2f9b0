//! Address API Module

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::state::MockState;

pub fn router() -> Router<MockState> {
    Router::new()
        .route(
            "/users/{id}/addresses",
            get(handler::list).post(handler::create),
        )
        .route(
            "/addresses/{id}",
            put(handler::update).delete(handler::delete),
        )
}
