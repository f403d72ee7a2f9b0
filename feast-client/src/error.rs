//! Client error types

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;
use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// The backend could not be reached or timed out
    #[error("Network error: {0}")]
    Network(String),

    /// The backend answered with a structured error
    #[error("{message}")]
    Api {
        code: u16,
        message: String,
        details: Option<HashMap<String, Value>>,
    },

    /// Authentication required or rejected
    #[error("Authentication required: {0}")]
    Unauthorized(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Request rejected before reaching the backend
    #[error("Validation error: {0}")]
    Validation(String),

    /// No route on the local backend matches the request
    #[error("No route for {method} {path}")]
    RouteNotFound { method: String, path: String },

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Persistent key-value store failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// A command with the same key is already in flight
    #[error("Operation already in progress: {0}")]
    Busy(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Error body as sent by the backend
///
/// Understands both the `{code, message, details}` shape and the
/// `{detail}` shape used by FastAPI-style servers.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub code: Option<u16>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub details: Option<HashMap<String, Value>>,
    #[serde(default)]
    pub detail: Option<Value>,
}

impl ClientError {
    /// Build an error from a non-success HTTP status and its raw body
    pub(crate) fn from_response(status: http::StatusCode, method: &str, path: &str, body: &[u8]) -> Self {
        let text = String::from_utf8_lossy(body).to_string();
        let parsed = serde_json::from_slice::<ErrorBody>(body).ok();

        let message = parsed
            .as_ref()
            .and_then(|b| {
                b.message.clone().or_else(|| {
                    b.detail.as_ref().map(|d| match d {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                })
            })
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .map(str::to_string)
                    .unwrap_or_else(|| text.clone())
            });

        if let Some(body) = &parsed
            && let Some(code) = body.code
        {
            if code == ErrorCode::RouteNotFound.code() {
                return ClientError::RouteNotFound {
                    method: method.to_string(),
                    path: path.to_string(),
                };
            }
            return ClientError::Api {
                code,
                message,
                details: body.details.clone(),
            };
        }

        match status {
            http::StatusCode::UNAUTHORIZED => ClientError::Unauthorized(message),
            http::StatusCode::NOT_FOUND => ClientError::NotFound(message),
            http::StatusCode::BAD_REQUEST | http::StatusCode::UNPROCESSABLE_ENTITY => {
                ClientError::Validation(message)
            }
            _ => ClientError::Internal(format!("{status}: {message}")),
        }
    }

    /// Error code carried by this error, mapped onto the shared code space
    pub fn code(&self) -> ErrorCode {
        match self {
            ClientError::Api { code, .. } => {
                ErrorCode::try_from(*code).unwrap_or(ErrorCode::Unknown)
            }
            ClientError::Network(_) => ErrorCode::NetworkError,
            ClientError::Unauthorized(_) => ErrorCode::NotAuthenticated,
            ClientError::NotFound(_) => ErrorCode::NotFound,
            ClientError::Validation(_) => ErrorCode::ValidationFailed,
            ClientError::RouteNotFound { .. } => ErrorCode::RouteNotFound,
            ClientError::InvalidResponse(_) | ClientError::Serialization(_) => {
                ErrorCode::InvalidRequest
            }
            ClientError::Storage(_) => ErrorCode::StorageError,
            ClientError::Busy(_) => ErrorCode::InvalidRequest,
            ClientError::Internal(_) => ErrorCode::InternalError,
        }
    }

    /// Whether the request should be replayed on the local backend
    ///
    /// Connectivity failures, timeouts and 404s qualify.
    pub fn is_fallback_trigger(&self) -> bool {
        match self {
            ClientError::Network(_) | ClientError::NotFound(_) | ClientError::RouteNotFound { .. } => {
                true
            }
            ClientError::Api { code, .. } => ErrorCode::try_from(*code)
                .map(|c| c.http_status() == http::StatusCode::NOT_FOUND)
                .unwrap_or(false),
            _ => false,
        }
    }

    /// Whether retrying the same request may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, ClientError::Network(_) | ClientError::Busy(_))
            || matches!(
                self.code(),
                ErrorCode::NetworkError | ErrorCode::TimeoutError | ErrorCode::CatalogUnavailable
            )
    }

    /// Whether the backend rejected the credentials or token
    pub fn is_unauthorized(&self) -> bool {
        match self {
            ClientError::Unauthorized(_) => true,
            ClientError::Api { code, .. } => ErrorCode::try_from(*code)
                .map(|c| c.http_status() == http::StatusCode::UNAUTHORIZED)
                .unwrap_or(false),
            _ => false,
        }
    }

    /// The coupon rejection this error represents, if any
    pub fn coupon_error(&self) -> Option<ErrorCode> {
        match self.code() {
            code @ (ErrorCode::CouponInvalid
            | ErrorCode::CouponBelowMinimum
            | ErrorCode::CouponNotEligible) => Some(code),
            _ => None,
        }
    }

    /// Message suitable for showing to the user
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() || err.is_connect() || err.is_request() {
            ClientError::Network(err.to_string())
        } else if err.is_decode() {
            ClientError::InvalidResponse(err.to_string())
        } else {
            ClientError::Internal(err.to_string())
        }
    }
}

impl From<AppError> for ClientError {
    fn from(err: AppError) -> Self {
        if err.code == ErrorCode::RouteNotFound {
            let detail = |key: &str| {
                err.details
                    .as_ref()
                    .and_then(|d| d.get(key))
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string()
            };
            return ClientError::RouteNotFound {
                method: detail("method"),
                path: detail("path"),
            };
        }
        ClientError::Api {
            code: err.code.code(),
            message: err.message,
            details: err.details,
        }
    }
}
