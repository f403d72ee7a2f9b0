//! Network backend over reqwest

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;

use super::{ApiRequest, BackendClient, parse_body};
use crate::error::{ClientError, ClientResult};

#[derive(Debug, Clone)]
pub struct NetworkBackend {
    client: Client,
    base_url: String,
}

impl NetworkBackend {
    pub fn new(base_url: &str, timeout_secs: u64) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl BackendClient for NetworkBackend {
    fn name(&self) -> &'static str {
        "network"
    }

    async fn send(&self, request: &ApiRequest) -> ClientResult<Value> {
        let url = format!("{}{}", self.base_url, request.path);
        let mut builder = self.client.request(request.method.clone(), &url);
        if let Some(token) = &request.token {
            builder = builder.bearer_auth(token);
        }
        if let Some((content_type, bytes)) = request.encoded_body()? {
            builder = builder.header(CONTENT_TYPE, content_type).body(bytes);
        }

        let response = builder.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            tracing::debug!(%status, method = %request.method, path = %request.route(), "Backend returned an error");
            return Err(ClientError::from_response(
                status,
                request.method.as_str(),
                request.route(),
                &bytes,
            ));
        }
        parse_body(&bytes)
    }
}
