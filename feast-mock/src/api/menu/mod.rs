//! Menu API Module

mod handler;

use axum::{Router, routing::get};

use crate::state::MockState;

pub fn router() -> Router<MockState> {
    Router::new().nest("/menu", routes())
}

fn routes() -> Router<MockState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id))
        .route("/restaurant/{id}", get(handler::for_restaurant))
}
