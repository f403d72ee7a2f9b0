//! Auth API Handlers

use axum::{Json, extract::State};
use shared::client::TokenResponse;
use shared::error::AppResult;
use shared::models::{RegisterRequest, User};

use crate::api::extract::{LoginForm, ValidJson};
use crate::auth::{CurrentUser, issue_tokens};
use crate::security_log;
use crate::state::MockState;

/// POST /auth/login - form fields `username` (e-mail) and `password`
pub async fn login(
    State(state): State<MockState>,
    LoginForm(credentials): LoginForm,
) -> AppResult<Json<TokenResponse>> {
    let user = state
        .store
        .authenticate(&credentials.username, &credentials.password)
        .inspect_err(|e| {
            security_log!(
                "login_failed",
                email = %credentials.username,
                reason = %e.code
            );
        })?;
    tracing::info!(user_id = %user.id, "User logged in");
    Ok(Json(issue_tokens(user)))
}

/// POST /auth/register - new customer account, signed in
pub async fn register(
    State(state): State<MockState>,
    ValidJson(payload): ValidJson<RegisterRequest>,
) -> AppResult<Json<TokenResponse>> {
    let user = state.store.register(payload)?;
    Ok(Json(issue_tokens(user)))
}

/// GET /auth/me
pub async fn me(CurrentUser(user): CurrentUser) -> Json<User> {
    Json(user)
}
