//! Persisted authentication state (`auth-storage`)

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use shared::client::TokenResponse;
use shared::models::User;
use tokio::sync::watch;

use super::persist::{KeyValueStore, persist, rehydrate};

pub const AUTH_KEY: &str = "auth-storage";

/// A signed-in user and their tokens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthSession {
    pub user: User,
    pub access_token: String,
    pub refresh_token: String,
}

impl From<TokenResponse> for AuthSession {
    fn from(tokens: TokenResponse) -> Self {
        Self {
            user: tokens.user,
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AuthStore {
    state: Arc<watch::Sender<Option<AuthSession>>>,
    storage: Arc<dyn KeyValueStore>,
}

impl AuthStore {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        let session = rehydrate::<AuthSession>(storage.as_ref(), AUTH_KEY);
        let (state, _) = watch::channel(session);
        Self {
            state: Arc::new(state),
            storage,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<AuthSession>> {
        self.state.subscribe()
    }

    pub fn session(&self) -> Option<AuthSession> {
        self.state.borrow().clone()
    }

    pub fn token(&self) -> Option<String> {
        self.state.borrow().as_ref().map(|s| s.access_token.clone())
    }

    pub fn user(&self) -> Option<User> {
        self.state.borrow().as_ref().map(|s| s.user.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_some()
    }

    pub fn sign_in(&self, tokens: TokenResponse) -> AuthSession {
        let session = AuthSession::from(tokens);
        persist(self.storage.as_ref(), AUTH_KEY, &session);
        self.state.send_replace(Some(session.clone()));
        session
    }

    /// Drop the session; returns whether one existed
    pub fn sign_out(&self) -> bool {
        if let Err(e) = self.storage.remove(AUTH_KEY) {
            tracing::warn!(error = %e, "Failed to clear persisted session");
        }
        self.state.send_replace(None).is_some()
    }

    /// Replace the stored user, keeping the tokens
    pub fn update_user(&self, user: User) {
        let updated = self.state.send_if_modified(|session| match session {
            Some(s) if s.user != user => {
                s.user = user;
                true
            }
            _ => false,
        });
        if updated && let Some(session) = self.session() {
            persist(self.storage.as_ref(), AUTH_KEY, &session);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::persist::MemoryStore;
    use serde_json::json;

    fn tokens() -> TokenResponse {
        serde_json::from_value(json!({
            "access_token": "mock_token_user_001",
            "refresh_token": "mock_refresh_user_001",
            "token_type": "bearer",
            "user": {
                "id": "user_001",
                "name": "John Doe",
                "email": "john.doe@example.com",
                "phone": "",
                "role": "customer",
                "profile_image": null,
                "is_active": true,
                "restaurant_id": null,
                "wallet_balance": 0.0,
                "loyalty_points": 0,
                "created_at": "2024-12-01T10:00:00Z"
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_sign_in_persists_and_rehydrates() {
        let storage: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let store = AuthStore::new(storage.clone());
        assert!(!store.is_authenticated());
        store.sign_in(tokens());

        let again = AuthStore::new(storage.clone());
        assert_eq!(again.token().as_deref(), Some("mock_token_user_001"));
        assert_eq!(again.user().unwrap().id, "user_001");

        assert!(again.sign_out());
        assert!(!again.sign_out());
        assert!(AuthStore::new(storage).session().is_none());
    }
}
