//! Storefront client façade
//!
//! Every request goes through [`StorefrontClient`], which attaches the
//! session token, hands the request to the configured backend and handles
//! session expiry.

use std::sync::Arc;

use http::Method;
use serde_json::Value;
use shared::client::TokenResponse;
use shared::models::{RegisterRequest, User};

use crate::backend::{ApiRequest, BackendClient};
use crate::endpoints::{Endpoint, Login, Me, Register};
use crate::error::{ClientError, ClientResult};
use crate::session::{LoginRedirect, Navigator};
use crate::store::AuthStore;

#[derive(Debug, Clone)]
pub struct StorefrontClient {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    backend: Arc<dyn BackendClient>,
    auth: AuthStore,
    redirect: LoginRedirect,
}

impl StorefrontClient {
    pub fn new(
        backend: Arc<dyn BackendClient>,
        auth: AuthStore,
        navigator: Arc<dyn Navigator>,
        login_path: impl Into<String>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                backend,
                auth,
                redirect: LoginRedirect::new(navigator, login_path),
            }),
        }
    }

    pub fn auth(&self) -> &AuthStore {
        &self.inner.auth
    }

    pub fn backend_name(&self) -> &'static str {
        self.inner.backend.name()
    }

    /// Untyped request; the success body is returned as sent
    pub async fn request(&self, method: Method, path: &str, body: Option<Value>) -> ClientResult<Value> {
        let mut request = ApiRequest::new(method, path);
        if let Some(body) = body {
            request = request.with_body(body);
        }
        self.send(request, false).await
    }

    /// Typed request
    pub async fn call<E: Endpoint>(&self, endpoint: &E) -> ClientResult<E::Response> {
        let mut request = ApiRequest::new(E::METHOD, endpoint.path()).with_encoding(E::ENCODING);
        if let Some(body) = endpoint.body()? {
            request = request.with_body(body);
        }
        let value = self.send(request, E::ANONYMOUS).await?;
        serde_json::from_value(value).map_err(|e| {
            ClientError::InvalidResponse(format!("{} {}: {e}", E::METHOD, endpoint.path()))
        })
    }

    async fn send(&self, mut request: ApiRequest, anonymous: bool) -> ClientResult<Value> {
        let token = if anonymous { None } else { self.inner.auth.token() };
        if let Some(token) = &token {
            request = request.with_token(token.clone());
        }

        let result = self.inner.backend.send(&request).await;
        if let Err(err) = &result {
            if token.is_some() && err.is_unauthorized() {
                tracing::warn!(method = %request.method, path = %request.route(), "Token rejected, clearing session");
                self.inner.auth.sign_out();
                self.inner.redirect.trigger();
            } else if let ClientError::RouteNotFound { method, path } = err {
                tracing::error!(%method, %path, "Request has no matching route");
            }
        }
        result
    }

    /// Log in with e-mail and password and store the session
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<User> {
        let tokens = self
            .call(&Login {
                email: email.trim().to_string(),
                password: password.to_string(),
            })
            .await?;
        Ok(self.start_session(tokens))
    }

    /// Create a customer account and sign in as it
    pub async fn register(&self, request: RegisterRequest) -> ClientResult<User> {
        let tokens = self.call(&Register(request)).await?;
        Ok(self.start_session(tokens))
    }

    fn start_session(&self, tokens: TokenResponse) -> User {
        let session = self.inner.auth.sign_in(tokens);
        self.inner.redirect.reset();
        tracing::info!(user_id = %session.user.id, "Signed in");
        session.user
    }

    pub fn logout(&self) {
        if self.inner.auth.sign_out() {
            tracing::info!("Signed out");
        }
    }

    /// Refresh the stored user from `/auth/me`
    pub async fn me(&self) -> ClientResult<User> {
        let user = self.call(&Me).await?;
        self.inner.auth.update_user(user.clone());
        Ok(user)
    }

    pub fn current_user(&self) -> Option<User> {
        self.inner.auth.user()
    }
}
