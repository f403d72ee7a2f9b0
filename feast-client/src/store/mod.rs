//! Client-side state
//!
//! - [`persist`] - key-value storage the stores save to
//! - [`cart`] - the cart (`cart-storage`)
//! - [`auth`] - user and tokens (`auth-storage`)
//! - [`favorites`] - favorite restaurants, updated optimistically

pub mod auth;
pub mod cart;
pub mod favorites;
pub mod persist;

pub use auth::{AuthSession, AuthStore};
pub use cart::CartStore;
pub use favorites::FavoritesStore;
pub use persist::{FileStore, KeyValueStore, MemoryStore};
