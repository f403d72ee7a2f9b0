//! Backend strategies
//!
//! A [`BackendClient`] turns an [`ApiRequest`] into the JSON body a storefront
//! backend answers with. Three strategies exist and one is chosen when the
//! client is constructed:
//!
//! - [`NetworkBackend`] - reqwest against a live server
//! - [`LocalBackend`] - the `feast-mock` router driven in-process
//! - [`FallbackBackend`] - network first, replaying on another backend when
//!   the network is unreachable

mod fallback;
mod local;
mod network;

pub use fallback::FallbackBackend;
pub use local::LocalBackend;
pub use network::NetworkBackend;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use http::Method;
use serde_json::Value;

use crate::config::{BackendMode, ClientConfig};
use crate::error::{ClientError, ClientResult};

/// How a request body is encoded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    #[default]
    Json,
    /// `application/x-www-form-urlencoded` (login)
    Form,
}

/// One backend call
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path with optional query string, e.g. `/restaurants?city=Delhi`
    pub path: String,
    pub body: Option<Value>,
    pub encoding: Encoding,
    pub token: Option<String>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            encoding: Encoding::Json,
            token: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Path without the query string
    pub fn route(&self) -> &str {
        self.path.split('?').next().unwrap_or(&self.path)
    }

    /// Content type and encoded bytes of the body, if any
    pub(crate) fn encoded_body(&self) -> ClientResult<Option<(&'static str, Vec<u8>)>> {
        let Some(body) = &self.body else {
            return Ok(None);
        };
        let encoded = match self.encoding {
            Encoding::Json => ("application/json", serde_json::to_vec(body)?),
            Encoding::Form => (
                "application/x-www-form-urlencoded",
                form_encode(body)?.into_bytes(),
            ),
        };
        Ok(Some(encoded))
    }
}

/// Encode a flat JSON object as `key=value&...`
pub(crate) fn form_encode(body: &Value) -> ClientResult<String> {
    let Value::Object(fields) = body else {
        return Err(ClientError::Validation(
            "form body must be a JSON object".to_string(),
        ));
    };
    let mut pairs = Vec::with_capacity(fields.len());
    for (key, value) in fields {
        let value = match value {
            Value::Null => continue,
            Value::String(s) => s.clone(),
            Value::Bool(_) | Value::Number(_) => value.to_string(),
            Value::Array(_) | Value::Object(_) => {
                return Err(ClientError::Validation(format!(
                    "form field {key} must be a scalar"
                )));
            }
        };
        pairs.push(format!(
            "{}={}",
            urlencoding::encode(key),
            urlencoding::encode(&value)
        ));
    }
    Ok(pairs.join("&"))
}

/// Parse a success body; an empty body is `null`
pub(crate) fn parse_body(bytes: &[u8]) -> ClientResult<Value> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(bytes)
        .map_err(|e| ClientError::InvalidResponse(format!("JSON parse error: {e}")))
}

/// A way of reaching the storefront backend
#[async_trait]
pub trait BackendClient: Send + Sync + fmt::Debug {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Send `request` and return the success body unchanged
    async fn send(&self, request: &ApiRequest) -> ClientResult<Value>;
}

/// Build the backend selected by `config.mode`
pub fn connect(config: &ClientConfig) -> ClientResult<Arc<dyn BackendClient>> {
    let backend: Arc<dyn BackendClient> = match config.mode {
        BackendMode::Local => Arc::new(LocalBackend::seeded()?),
        BackendMode::Network => Arc::new(NetworkBackend::new(&config.api_url, config.timeout_secs)?),
        BackendMode::Fallback => Arc::new(FallbackBackend::new(
            Arc::new(NetworkBackend::new(&config.api_url, config.timeout_secs)?),
            Arc::new(LocalBackend::seeded()?),
        )),
    };
    tracing::info!(backend = backend.name(), api_url = %config.api_url, "Backend selected");
    Ok(backend)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_form_encoding() {
        let body = json!({"username": "john.doe@example.com", "password": "p&ss word"});
        let encoded = form_encode(&body).unwrap();
        assert!(encoded.contains("username=john.doe%40example.com"));
        assert!(encoded.contains("password=p%26ss%20word"));
        assert!(form_encode(&json!(["x"])).is_err());
    }

    #[test]
    fn test_route_strips_query() {
        let request = ApiRequest::get("/restaurants?city=Delhi");
        assert_eq!(request.route(), "/restaurants");
        assert_eq!(ApiRequest::get("/menu").route(), "/menu");
    }

    #[test]
    fn test_empty_body_is_null() {
        assert_eq!(parse_body(b"").unwrap(), Value::Null);
        assert!(parse_body(b"<html>").is_err());
    }
}
