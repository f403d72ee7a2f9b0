//! In-process backend
//!
//! Drives the `feast-mock` router with `tower::ServiceExt::oneshot`; the
//! router's path patterns are the routing table.

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use http::{Request, header};
use serde_json::Value;
use tower::ServiceExt;

use feast_mock::MockState;

use super::{ApiRequest, BackendClient, parse_body};
use crate::error::{ClientError, ClientResult};

#[derive(Debug, Clone)]
pub struct LocalBackend {
    router: Router,
}

impl LocalBackend {
    /// Wrap a router that already has its state applied
    pub fn new(router: Router) -> Self {
        Self { router }
    }

    /// The mock backend over its seeded demo data
    pub fn seeded() -> ClientResult<Self> {
        Ok(Self::with_state(MockState::seeded()?))
    }

    pub fn with_state(state: MockState) -> Self {
        Self::new(feast_mock::app(state))
    }

    fn build_request(&self, request: &ApiRequest) -> ClientResult<Request<Body>> {
        let mut builder = Request::builder()
            .method(request.method.clone())
            .uri(request.path.as_str());
        if let Some(token) = &request.token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let body = match request.encoded_body()? {
            Some((content_type, bytes)) => {
                builder = builder.header(header::CONTENT_TYPE, content_type);
                Body::from(bytes)
            }
            None => Body::empty(),
        };
        builder
            .body(body)
            .map_err(|e| ClientError::Internal(format!("Failed to build request: {e}")))
    }
}

#[async_trait]
impl BackendClient for LocalBackend {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn send(&self, request: &ApiRequest) -> ClientResult<Value> {
        let http_request = self.build_request(request)?;
        let response = self
            .router
            .clone()
            .oneshot(http_request)
            .await
            .map_err(|e| ClientError::Internal(format!("Oneshot call failed: {e}")))?;

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .map_err(|e| ClientError::Internal(format!("Failed to read body: {e}")))?;

        if !status.is_success() {
            let err = ClientError::from_response(status, request.method.as_str(), request.route(), &bytes);
            if matches!(err, ClientError::RouteNotFound { .. }) {
                tracing::warn!(method = %request.method, path = %request.route(), "No local route for request");
            }
            return Err(err);
        }
        parse_body(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unknown_route() {
        let backend = LocalBackend::seeded().unwrap();
        let err = backend
            .send(&ApiRequest::get("/does/not/exist?x=1"))
            .await
            .unwrap_err();
        assert!(
            matches!(err, ClientError::RouteNotFound { ref method, ref path } if method == "GET" && path == "/does/not/exist")
        );
    }

    #[tokio::test]
    async fn test_query_is_parsed_by_handler() {
        let backend = LocalBackend::seeded().unwrap();
        let body = backend
            .send(&ApiRequest::get("/restaurants?city=Mumbai"))
            .await
            .unwrap();
        let list = body.as_array().unwrap();
        assert_eq!(list.len(), 2);
        assert!(list.iter().all(|r| r["city"] == "Mumbai"));
    }
}
