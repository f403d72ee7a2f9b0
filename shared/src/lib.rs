//! Shared types for the Feast storefront
//!
//! Domain types, pure state machines (cart, coupon, order lifecycle), money
//! arithmetic and the unified error system used by both the mock backend
//! and the client.

pub mod cart;
pub mod client;
pub mod coupon;
pub mod error;
pub mod models;
pub mod order;
pub mod util;

// Re-exports
pub use axum::{Json, body};
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult, ErrorBody, ErrorCode};
