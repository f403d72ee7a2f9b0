//! Favorite restaurants of the signed-in user, toggled optimistically

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::watch;

use crate::command::{CommandExecutor, OptimisticCommand};
use crate::endpoints::{AddFavorite, ListFavorites, RemoveFavorite};
use crate::error::ClientResult;
use crate::facade::StorefrontClient;

#[derive(Debug, Clone)]
pub struct FavoritesStore {
    state: Arc<watch::Sender<Vec<String>>>,
}

impl Default for FavoritesStore {
    fn default() -> Self {
        let (state, _) = watch::channel(Vec::new());
        Self {
            state: Arc::new(state),
        }
    }
}

impl FavoritesStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<String>> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> Vec<String> {
        self.state.borrow().clone()
    }

    pub fn contains(&self, restaurant_id: &str) -> bool {
        self.state.borrow().iter().any(|id| id == restaurant_id)
    }

    /// Replace the list with the backend's
    pub async fn refresh(&self, client: &StorefrontClient, user_id: &str) -> ClientResult<Vec<String>> {
        let list = client
            .call(&ListFavorites {
                user_id: user_id.to_string(),
            })
            .await?;
        self.state.send_replace(list.clone());
        Ok(list)
    }

    /// Flip one restaurant in or out of the favorites
    ///
    /// The list changes immediately. If the backend call fails only this
    /// restaurant is put back the way it was; toggles of other restaurants
    /// still in flight keep their optimistic entries. Toggling the same
    /// restaurant again while a call is in flight fails with `Busy`.
    ///
    /// Returns the list as it stands once the call settles.
    pub async fn toggle(
        &self,
        executor: &CommandExecutor,
        client: &StorefrontClient,
        user_id: &str,
        restaurant_id: &str,
    ) -> ClientResult<Vec<String>> {
        let position = self.state.borrow().iter().position(|id| id == restaurant_id);
        let command = ToggleFavorite {
            state: self.state.clone(),
            client: client.clone(),
            user_id: user_id.to_string(),
            restaurant_id: restaurant_id.to_string(),
            removed_from: position,
        };
        let server = executor.run(&command).await?;
        tracing::debug!(restaurant_id, server = server.len(), "Favorite toggled");
        Ok(self.snapshot())
    }
}

struct ToggleFavorite {
    state: Arc<watch::Sender<Vec<String>>>,
    client: StorefrontClient,
    user_id: String,
    restaurant_id: String,
    /// Index the restaurant had before a removal; `None` when adding
    removed_from: Option<usize>,
}

impl ToggleFavorite {
    fn adding(&self) -> bool {
        self.removed_from.is_none()
    }
}

#[async_trait]
impl OptimisticCommand for ToggleFavorite {
    type State = Vec<String>;
    type Output = Vec<String>;

    fn key(&self) -> String {
        format!("favorite:{}:{}", self.user_id, self.restaurant_id)
    }

    fn target(&self) -> &watch::Sender<Vec<String>> {
        &self.state
    }

    fn apply(&self, current: &Vec<String>) -> Vec<String> {
        let mut next: Vec<String> = current
            .iter()
            .filter(|id| **id != self.restaurant_id)
            .cloned()
            .collect();
        if self.adding() {
            next.push(self.restaurant_id.clone());
        }
        next
    }

    fn revert(&self, current: &Vec<String>) -> Vec<String> {
        let mut next = current.clone();
        match self.removed_from {
            None => next.retain(|id| *id != self.restaurant_id),
            Some(index) if !next.contains(&self.restaurant_id) => {
                next.insert(index.min(next.len()), self.restaurant_id.clone());
            }
            Some(_) => {}
        }
        next
    }

    async fn commit(&self) -> ClientResult<Vec<String>> {
        if self.adding() {
            self.client
                .call(&AddFavorite {
                    user_id: self.user_id.clone(),
                    restaurant_id: self.restaurant_id.clone(),
                })
                .await
        } else {
            self.client
                .call(&RemoveFavorite {
                    user_id: self.user_id.clone(),
                    restaurant_id: self.restaurant_id.clone(),
                })
                .await
        }
    }
}
