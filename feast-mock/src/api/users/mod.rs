//! User Account API Module
//!
//! Profile, password and wallet of one user. Callers may only reach their
//! own account; admins may reach any.

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::MockState;

pub fn router() -> Router<MockState> {
    Router::new()
        .route(
            "/users/{id}/profile",
            get(handler::profile).put(handler::update_profile),
        )
        .route("/users/{id}/password", put(handler::change_password))
        .route("/users/{id}/wallet", get(handler::wallet))
        .route("/users/{id}/wallet/top-up", post(handler::top_up))
        .route("/users/{id}/transactions", get(handler::transactions))
}
