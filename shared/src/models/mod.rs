//! Data models
//!
//! Shared between the mock backend and the client (via API). Ids are opaque
//! strings; money is `Decimal` and travels as a JSON number.

pub mod address;
pub mod favorite;
pub mod menu_item;
pub mod notification;
pub mod payment_method;
pub mod restaurant;
pub mod review;
pub mod user;
pub mod wallet;

// Re-exports
pub use address::*;
pub use favorite::*;
pub use menu_item::*;
pub use notification::*;
pub use payment_method::*;
pub use restaurant::*;
pub use review::*;
pub use user::*;
pub use wallet::*;
