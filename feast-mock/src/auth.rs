//! Opaque bearer tokens
//!
//! Access tokens are `mock_token_<user id>`; there is no signature and no
//! expiry. The [`CurrentUser`] extractor resolves the token against the
//! store and rejects inactive accounts.

use axum::{extract::FromRequestParts, http::request::Parts};
use shared::client::TokenResponse;
use shared::error::{AppError, ErrorCode};
use shared::models::User;

use crate::security_log;
use crate::state::MockState;

pub const ACCESS_PREFIX: &str = "mock_token_";
pub const REFRESH_PREFIX: &str = "mock_refresh_";

/// Token pair for a signed-in user
pub fn issue_tokens(user: User) -> TokenResponse {
    TokenResponse {
        access_token: format!("{ACCESS_PREFIX}{}", user.id),
        refresh_token: format!("{REFRESH_PREFIX}{}", user.id),
        token_type: "bearer".to_string(),
        user,
    }
}

/// Extract the token from an `Authorization: Bearer ...` header value
pub fn bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .or_else(|| header.strip_prefix("bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Authenticated caller
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl CurrentUser {
    pub fn id(&self) -> &str {
        &self.0.id
    }

    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.0.is_admin() {
            Ok(())
        } else {
            Err(AppError::new(ErrorCode::AdminRequired))
        }
    }

    /// Admins, and the owner of `restaurant_id`
    pub fn require_restaurant(&self, restaurant_id: &str) -> Result<(), AppError> {
        if self.0.is_admin() || self.0.owns_restaurant(restaurant_id) {
            Ok(())
        } else {
            Err(AppError::permission_denied(format!(
                "Not allowed to manage restaurant {restaurant_id}"
            )))
        }
    }

    /// Admins, and the user `user_id` themselves
    pub fn require_self(&self, user_id: &str) -> Result<(), AppError> {
        if self.0.is_admin() || self.0.id == user_id {
            Ok(())
        } else {
            Err(AppError::permission_denied("Not allowed to act for another user"))
        }
    }
}

impl FromRequestParts<MockState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &MockState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }

        let header = parts
            .headers
            .get(http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        let token = match header {
            Some(value) => bearer_token(value)
                .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?,
            None => {
                security_log!("auth_missing", uri = %parts.uri);
                return Err(AppError::not_authenticated());
            }
        };

        let Some(user_id) = token.strip_prefix(ACCESS_PREFIX) else {
            security_log!("auth_failed", reason = "malformed_token", uri = %parts.uri);
            return Err(AppError::invalid_token("Invalid token"));
        };

        let user = state.store.user(user_id).map_err(|_| {
            security_log!("auth_failed", reason = "unknown_user", user_id, uri = %parts.uri);
            AppError::invalid_token("Invalid token")
        })?;

        if !user.is_active {
            security_log!("auth_failed", reason = "account_disabled", user_id, uri = %parts.uri);
            return Err(AppError::new(ErrorCode::AccountDisabled));
        }

        let current = CurrentUser(user);
        parts.extensions.insert(current.clone());
        Ok(current)
    }
}
