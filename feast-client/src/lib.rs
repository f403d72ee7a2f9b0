//! Feast Client - storefront commerce state
//!
//! Talks to a storefront backend over the network, or to the in-process
//! `feast-mock` router when the network is unavailable, and keeps the
//! client-side state (cart, session, favorites) persisted and observable.

pub mod backend;
pub mod checkout;
pub mod command;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod facade;
pub mod session;
pub mod store;

pub use backend::{ApiRequest, BackendClient, Encoding, FallbackBackend, LocalBackend, NetworkBackend};
pub use checkout::{CheckoutDetails, CheckoutFlow};
pub use command::{CommandExecutor, OptimisticCommand};
pub use config::{BackendMode, ClientConfig};
pub use error::{ClientError, ClientResult};
pub use facade::StorefrontClient;
pub use session::{LogNavigator, Navigator};
pub use store::{AuthStore, CartStore, FavoritesStore, KeyValueStore};

use std::sync::Arc;

/// Everything a storefront UI needs, wired to one backend and one storage
#[derive(Debug, Clone)]
pub struct Storefront {
    pub client: StorefrontClient,
    pub cart: CartStore,
    pub favorites: FavoritesStore,
    pub checkout: CheckoutFlow,
    pub executor: CommandExecutor,
}

impl Storefront {
    /// Build from configuration; stores rehydrate before this returns
    pub fn connect(config: &ClientConfig, navigator: Arc<dyn Navigator>) -> ClientResult<Self> {
        let storage = store::persist::open(config)?;
        let backend = backend::connect(config)?;
        Ok(Self::assemble(backend, storage, navigator, &config.login_path))
    }

    pub fn assemble(
        backend: Arc<dyn BackendClient>,
        storage: Arc<dyn KeyValueStore>,
        navigator: Arc<dyn Navigator>,
        login_path: &str,
    ) -> Self {
        let auth = AuthStore::new(storage.clone());
        let cart = CartStore::new(storage);
        let client = StorefrontClient::new(backend, auth, navigator, login_path);
        Self {
            checkout: CheckoutFlow::new(client.clone(), cart.clone()),
            client,
            cart,
            favorites: FavoritesStore::new(),
            executor: CommandExecutor::new(),
        }
    }

    /// Favorite toggle for the signed-in user
    pub async fn toggle_favorite(&self, restaurant_id: &str) -> ClientResult<Vec<String>> {
        let user = self
            .client
            .current_user()
            .ok_or_else(|| ClientError::Unauthorized("Please log in to continue".to_string()))?;
        self.favorites
            .toggle(&self.executor, &self.client, &user.id, restaurant_id)
            .await
    }

    /// Load a past order's lines into the cart at their purchase prices
    pub fn reorder(&self, order: &shared::order::Order) -> ClientResult<()> {
        self.cart.replace_items(order.reorder_items()?)
    }
}
