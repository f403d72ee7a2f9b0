//! Feast mock backend
//!
//! An axum router over seeded in-memory tables and a CSV catalog. The same
//! router serves real HTTP (the `feast-mock` binary) and in-process
//! `oneshot` calls from the client's local backend.

pub mod api;
pub mod auth;
pub mod catalog;
pub mod config;
pub mod logger;
pub mod seed;
pub mod state;
pub mod store;

pub use catalog::Catalog;
pub use config::MockConfig;
pub use state::MockState;
pub use store::MockStore;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// All routes, no middleware, no state
pub fn build_router() -> Router<MockState> {
    Router::new()
        .merge(api::restaurants::router())
        .merge(api::menu::router())
        .merge(api::auth::router())
        .merge(api::orders::router())
        .merge(api::users::router())
        .merge(api::addresses::router())
        .merge(api::payment_methods::router())
        .merge(api::favorites::router())
        .merge(api::coupons::router())
        .merge(api::notifications::router())
        .merge(api::reviews::router())
        .merge(api::admin::router())
        .merge(api::owner::router())
        .fallback(api::route_not_found)
        .method_not_allowed_fallback(api::route_not_found)
}

/// Routes with CORS and request tracing
pub fn build_app() -> Router<MockState> {
    build_router()
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// The application bound to `state`, ready to serve or `oneshot`
pub fn app(state: MockState) -> Router {
    build_app().with_state(state)
}

/// Serve the mock backend over HTTP until the process is stopped
pub async fn serve(config: MockConfig) -> anyhow::Result<()> {
    let state = MockState::from_config(&config)?;
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.http_port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Feast mock backend listening");
    axum::serve(listener, app(state)).await?;
    Ok(())
}
