//! Auth API Module

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::MockState;

pub fn router() -> Router<MockState> {
    Router::new().nest("/auth", routes())
}

fn routes() -> Router<MockState> {
    Router::new()
        .route("/login", post(handler::login))
        .route("/register", post(handler::register))
        .route("/me", get(handler::me))
}
