//! HTTP routes of the mock backend
//!
//! # Structure
//!
//! - [`restaurants`] - restaurant catalog and reviews
//! - [`menu`] - menu items
//! - [`auth`] - login, registration, current user
//! - [`orders`] - order creation and lifecycle
//! - [`users`] - profile, password and wallet
//! - [`addresses`] / [`payment_methods`] - account data
//! - [`favorites`] / [`notifications`] / [`reviews`] - engagement
//! - [`coupons`] - coupon listing and validation
//! - [`admin`] / [`owner`] - dashboards, restaurant and menu management

pub mod extract;

pub mod addresses;
pub mod admin;
pub mod auth;
pub mod coupons;
pub mod favorites;
pub mod menu;
pub mod notifications;
pub mod orders;
pub mod owner;
pub mod payment_methods;
pub mod restaurants;
pub mod reviews;
pub mod users;

use axum::http::{Method, Uri};
use shared::error::AppError;

/// Fallback for requests no route matches
pub async fn route_not_found(method: Method, uri: Uri) -> AppError {
    tracing::warn!(%method, path = %uri.path(), "No route matches request");
    AppError::route_not_found(method.as_str(), uri.path())
}
