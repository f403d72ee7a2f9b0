//! Persisted, observable cart
//!
//! Every mutation computes a new [`Cart`] from the current one, saves it
//! under `cart-storage` and publishes it to subscribers as a whole.

use std::sync::Arc;

use rust_decimal::Decimal;
use shared::cart::{AddItemOutcome, Cart, CartItem, PendingReplace};
use tokio::sync::watch;

use super::persist::{KeyValueStore, persist, rehydrate};
use crate::error::ClientResult;

pub const CART_KEY: &str = "cart-storage";

#[derive(Debug, Clone)]
pub struct CartStore {
    state: Arc<watch::Sender<Cart>>,
    storage: Arc<dyn KeyValueStore>,
}

impl CartStore {
    /// Rehydrate from `storage`; an unreadable or invalid saved cart starts
    /// empty
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        let cart = rehydrate::<Cart>(storage.as_ref(), CART_KEY).unwrap_or_default();
        let (state, _) = watch::channel(cart);
        Self {
            state: Arc::new(state),
            storage,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Cart> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> Cart {
        self.state.borrow().clone()
    }

    fn commit(&self, cart: Cart) {
        persist(self.storage.as_ref(), CART_KEY, &cart);
        self.state.send_replace(cart);
    }

    /// Add one unit of `item`
    ///
    /// A conflict with the cart's restaurant changes nothing; pass the
    /// returned token to [`confirm_replace`](Self::confirm_replace) to
    /// start over with the new restaurant.
    pub fn add_item(&self, item: CartItem) -> AddItemOutcome {
        let mut cart = self.snapshot();
        let outcome = cart.add_item(item);
        if !matches!(outcome, AddItemOutcome::RestaurantConflict(_)) {
            self.commit(cart);
        }
        outcome
    }

    pub fn confirm_replace(&self, pending: PendingReplace) {
        let mut cart = self.snapshot();
        cart.confirm_replace(pending);
        self.commit(cart);
    }

    /// Set a line's quantity; zero or less removes it
    pub fn update_quantity(&self, id: &str, quantity: i64) -> ClientResult<()> {
        let mut cart = self.snapshot();
        cart.update_quantity(id, quantity)?;
        self.commit(cart);
        Ok(())
    }

    pub fn remove_item(&self, id: &str) -> bool {
        let mut cart = self.snapshot();
        let removed = cart.remove_item(id);
        if removed {
            self.commit(cart);
        }
        removed
    }

    pub fn clear(&self) {
        self.commit(Cart::new());
    }

    /// Remove what an order placed from `ordered` bought
    ///
    /// Lines added while the order was in flight stay in the cart.
    pub fn settle(&self, ordered: &Cart) {
        let mut cart = self.snapshot();
        cart.take_ordered(ordered);
        tracing::debug!(left = cart.item_count(), "Cart settled after order");
        self.commit(cart);
    }

    /// Replace the whole cart, e.g. with the lines of a past order
    pub fn replace_items(&self, items: Vec<CartItem>) -> ClientResult<()> {
        self.commit(Cart::from_items(items)?);
        Ok(())
    }

    pub fn total(&self) -> Decimal {
        self.state.borrow().total()
    }

    pub fn item_count(&self) -> u32 {
        self.state.borrow().item_count()
    }
}
