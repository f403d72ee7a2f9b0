//! Network-first backend with local replay

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use super::{ApiRequest, BackendClient};
use crate::error::ClientResult;

/// Sends to `primary`; on a connectivity failure, timeout or 404 the same
/// request is replayed on `fallback`
#[derive(Debug, Clone)]
pub struct FallbackBackend {
    primary: Arc<dyn BackendClient>,
    fallback: Arc<dyn BackendClient>,
}

impl FallbackBackend {
    pub fn new(primary: Arc<dyn BackendClient>, fallback: Arc<dyn BackendClient>) -> Self {
        Self { primary, fallback }
    }
}

#[async_trait]
impl BackendClient for FallbackBackend {
    fn name(&self) -> &'static str {
        "fallback"
    }

    async fn send(&self, request: &ApiRequest) -> ClientResult<Value> {
        match self.primary.send(request).await {
            Err(err) if err.is_fallback_trigger() => {
                tracing::warn!(
                    method = %request.method,
                    path = %request.route(),
                    primary = self.primary.name(),
                    fallback = self.fallback.name(),
                    error = %err,
                    "Primary backend unavailable, serving request locally"
                );
                self.fallback.send(request).await
            }
            result => result,
        }
    }
}
