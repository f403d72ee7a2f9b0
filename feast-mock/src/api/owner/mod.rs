//! Restaurant Owner API Module
//!
//! Owners reach only their own restaurant; admins reach every one.

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::state::MockState;

pub fn router() -> Router<MockState> {
    Router::new().nest("/owner", routes())
}

fn routes() -> Router<MockState> {
    Router::new()
        .route("/restaurants/{id}", put(handler::update_restaurant))
        .route("/restaurants/{id}/orders", get(handler::orders))
        .route("/restaurants/{id}/stats", get(handler::stats))
        .route(
            "/restaurants/{id}/menu",
            get(handler::menu).post(handler::create_menu_item),
        )
        .route(
            "/menu/{id}",
            put(handler::update_menu_item).delete(handler::delete_menu_item),
        )
}
