//! Coupon API Module

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::MockState;

pub fn router() -> Router<MockState> {
    Router::new().nest("/coupons", routes())
}

fn routes() -> Router<MockState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/{code}/validate", post(handler::validate))
}
