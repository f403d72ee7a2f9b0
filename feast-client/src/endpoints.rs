//! Typed storefront routes
//!
//! Each endpoint names its method, path, body and response type. Path
//! segments and query values are percent-encoded.

use std::borrow::Cow;

use http::Method;
use rust_decimal::Decimal;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use shared::client::{LoginRequest, SuccessResponse, TokenResponse};
use shared::coupon::{Coupon, CouponValidateRequest, CouponValidation};
use shared::models::{
    Address, AddressCreate, AddressUpdate, FavoriteAdd, MenuItem, MenuItemCreate, MenuItemUpdate,
    Notification, PasswordChange, PaymentMethod, PaymentMethodCreate, ProfileUpdate,
    RegisterRequest, Restaurant, RestaurantFilter, RestaurantStatusUpdate, RestaurantUpdate,
    Review, ReviewCreate, TopUpRequest, Transaction, User, UserStatusUpdate, WalletBalance,
};
use shared::order::{
    Actor, CancelRequest, CheckoutRequest, Order, OrderStats, OrderStatus, OwnerStats,
    StatusUpdateRequest,
};

use crate::backend::Encoding;
use crate::error::ClientResult;

pub trait Endpoint {
    type Response: DeserializeOwned;

    const METHOD: Method;
    const ENCODING: Encoding = Encoding::Json;
    /// Sent without the session token
    const ANONYMOUS: bool = false;

    fn path(&self) -> String;

    fn body(&self) -> ClientResult<Option<Value>> {
        Ok(None)
    }
}

fn seg(value: &str) -> Cow<'_, str> {
    urlencoding::encode(value)
}

fn json_body<T: Serialize>(value: &T) -> ClientResult<Option<Value>> {
    Ok(Some(serde_json::to_value(value)?))
}

// ==================== Catalog ====================

#[derive(Debug, Clone, Default)]
pub struct ListRestaurants {
    pub filter: RestaurantFilter,
}

impl Endpoint for ListRestaurants {
    type Response = Vec<Restaurant>;
    const METHOD: Method = Method::GET;

    fn path(&self) -> String {
        let params: Vec<String> = [
            ("city", &self.filter.city),
            ("cuisine", &self.filter.cuisine),
            ("search", &self.filter.search),
        ]
        .into_iter()
        .filter_map(|(key, value)| {
            value
                .as_deref()
                .filter(|v| !v.trim().is_empty())
                .map(|v| format!("{key}={}", seg(v)))
        })
        .collect();
        if params.is_empty() {
            "/restaurants".to_string()
        } else {
            format!("/restaurants?{}", params.join("&"))
        }
    }
}

pub struct GetRestaurant {
    pub id: String,
}

impl Endpoint for GetRestaurant {
    type Response = Restaurant;
    const METHOD: Method = Method::GET;

    fn path(&self) -> String {
        format!("/restaurants/{}", seg(&self.id))
    }
}

pub struct RestaurantReviews {
    pub restaurant_id: String,
}

impl Endpoint for RestaurantReviews {
    type Response = Vec<Review>;
    const METHOD: Method = Method::GET;

    fn path(&self) -> String {
        format!("/restaurants/{}/reviews", seg(&self.restaurant_id))
    }
}

pub struct ListMenu;

impl Endpoint for ListMenu {
    type Response = Vec<MenuItem>;
    const METHOD: Method = Method::GET;

    fn path(&self) -> String {
        "/menu".to_string()
    }
}

pub struct GetMenuItem {
    pub id: String,
}

impl Endpoint for GetMenuItem {
    type Response = MenuItem;
    const METHOD: Method = Method::GET;

    fn path(&self) -> String {
        format!("/menu/{}", seg(&self.id))
    }
}

pub struct RestaurantMenu {
    pub restaurant_id: String,
}

impl Endpoint for RestaurantMenu {
    type Response = Vec<MenuItem>;
    const METHOD: Method = Method::GET;

    fn path(&self) -> String {
        format!("/menu/restaurant/{}", seg(&self.restaurant_id))
    }
}

// ==================== Auth ====================

/// Form-encoded login; `username` carries the e-mail address
pub struct Login {
    pub email: String,
    pub password: String,
}

impl Endpoint for Login {
    type Response = TokenResponse;
    const METHOD: Method = Method::POST;
    const ENCODING: Encoding = Encoding::Form;
    const ANONYMOUS: bool = true;

    fn path(&self) -> String {
        "/auth/login".to_string()
    }

    fn body(&self) -> ClientResult<Option<Value>> {
        json_body(&LoginRequest {
            username: self.email.clone(),
            password: self.password.clone(),
        })
    }
}

pub struct Register(pub RegisterRequest);

impl Endpoint for Register {
    type Response = TokenResponse;
    const METHOD: Method = Method::POST;
    const ANONYMOUS: bool = true;

    fn path(&self) -> String {
        "/auth/register".to_string()
    }

    fn body(&self) -> ClientResult<Option<Value>> {
        json_body(&self.0)
    }
}

pub struct Me;

impl Endpoint for Me {
    type Response = User;
    const METHOD: Method = Method::GET;

    fn path(&self) -> String {
        "/auth/me".to_string()
    }
}

// ==================== Orders ====================

pub struct CreateOrder(pub CheckoutRequest);

impl Endpoint for CreateOrder {
    type Response = Order;
    const METHOD: Method = Method::POST;

    fn path(&self) -> String {
        "/orders".to_string()
    }

    fn body(&self) -> ClientResult<Option<Value>> {
        json_body(&self.0)
    }
}

pub struct GetOrder {
    pub id: String,
}

impl Endpoint for GetOrder {
    type Response = Order;
    const METHOD: Method = Method::GET;

    fn path(&self) -> String {
        format!("/orders/{}", seg(&self.id))
    }
}

pub struct UserOrders {
    pub user_id: String,
}

impl Endpoint for UserOrders {
    type Response = Vec<Order>;
    const METHOD: Method = Method::GET;

    fn path(&self) -> String {
        format!("/orders/user/{}", seg(&self.user_id))
    }
}

pub struct UpdateOrderStatus {
    pub order_id: String,
    pub status: OrderStatus,
}

impl Endpoint for UpdateOrderStatus {
    type Response = Order;
    const METHOD: Method = Method::PUT;

    fn path(&self) -> String {
        format!("/orders/{}/status", seg(&self.order_id))
    }

    fn body(&self) -> ClientResult<Option<Value>> {
        json_body(&StatusUpdateRequest {
            status: self.status,
        })
    }
}

pub struct CancelOrder {
    pub order_id: String,
    pub reason: String,
    /// Only honoured for admins
    pub cancelled_by: Option<Actor>,
}

impl Endpoint for CancelOrder {
    type Response = Order;
    const METHOD: Method = Method::POST;

    fn path(&self) -> String {
        format!("/orders/{}/cancel", seg(&self.order_id))
    }

    fn body(&self) -> ClientResult<Option<Value>> {
        json_body(&CancelRequest {
            reason: self.reason.clone(),
            cancelled_by: self.cancelled_by,
        })
    }
}

// ==================== Profile & wallet ====================

pub struct GetProfile {
    pub user_id: String,
}

impl Endpoint for GetProfile {
    type Response = User;
    const METHOD: Method = Method::GET;

    fn path(&self) -> String {
        format!("/users/{}/profile", seg(&self.user_id))
    }
}

pub struct UpdateProfile {
    pub user_id: String,
    pub update: ProfileUpdate,
}

impl Endpoint for UpdateProfile {
    type Response = User;
    const METHOD: Method = Method::PUT;

    fn path(&self) -> String {
        format!("/users/{}/profile", seg(&self.user_id))
    }

    fn body(&self) -> ClientResult<Option<Value>> {
        json_body(&self.update)
    }
}

pub struct ChangePassword {
    pub user_id: String,
    pub change: PasswordChange,
}

impl Endpoint for ChangePassword {
    type Response = SuccessResponse;
    const METHOD: Method = Method::PUT;

    fn path(&self) -> String {
        format!("/users/{}/password", seg(&self.user_id))
    }

    fn body(&self) -> ClientResult<Option<Value>> {
        json_body(&self.change)
    }
}

pub struct GetWallet {
    pub user_id: String,
}

impl Endpoint for GetWallet {
    type Response = WalletBalance;
    const METHOD: Method = Method::GET;

    fn path(&self) -> String {
        format!("/users/{}/wallet", seg(&self.user_id))
    }
}

pub struct TopUpWallet {
    pub user_id: String,
    pub request: TopUpRequest,
}

impl Endpoint for TopUpWallet {
    type Response = WalletBalance;
    const METHOD: Method = Method::POST;

    fn path(&self) -> String {
        format!("/users/{}/wallet/top-up", seg(&self.user_id))
    }

    fn body(&self) -> ClientResult<Option<Value>> {
        json_body(&self.request)
    }
}

/// Newest first
pub struct UserTransactions {
    pub user_id: String,
}

impl Endpoint for UserTransactions {
    type Response = Vec<Transaction>;
    const METHOD: Method = Method::GET;

    fn path(&self) -> String {
        format!("/users/{}/transactions", seg(&self.user_id))
    }
}

// ==================== Addresses & payment methods ====================

pub struct ListAddresses {
    pub user_id: String,
}

impl Endpoint for ListAddresses {
    type Response = Vec<Address>;
    const METHOD: Method = Method::GET;

    fn path(&self) -> String {
        format!("/users/{}/addresses", seg(&self.user_id))
    }
}

pub struct CreateAddress {
    pub user_id: String,
    pub address: AddressCreate,
}

impl Endpoint for CreateAddress {
    type Response = Address;
    const METHOD: Method = Method::POST;

    fn path(&self) -> String {
        format!("/users/{}/addresses", seg(&self.user_id))
    }

    fn body(&self) -> ClientResult<Option<Value>> {
        json_body(&self.address)
    }
}

pub struct UpdateAddress {
    pub address_id: String,
    pub update: AddressUpdate,
}

impl Endpoint for UpdateAddress {
    type Response = Address;
    const METHOD: Method = Method::PUT;

    fn path(&self) -> String {
        format!("/addresses/{}", seg(&self.address_id))
    }

    fn body(&self) -> ClientResult<Option<Value>> {
        json_body(&self.update)
    }
}

pub struct DeleteAddress {
    pub address_id: String,
}

impl Endpoint for DeleteAddress {
    type Response = SuccessResponse;
    const METHOD: Method = Method::DELETE;

    fn path(&self) -> String {
        format!("/addresses/{}", seg(&self.address_id))
    }
}

pub struct ListPaymentMethods {
    pub user_id: String,
}

impl Endpoint for ListPaymentMethods {
    type Response = Vec<PaymentMethod>;
    const METHOD: Method = Method::GET;

    fn path(&self) -> String {
        format!("/users/{}/payment-methods", seg(&self.user_id))
    }
}

pub struct CreatePaymentMethod {
    pub user_id: String,
    pub method: PaymentMethodCreate,
}

impl Endpoint for CreatePaymentMethod {
    type Response = PaymentMethod;
    const METHOD: Method = Method::POST;

    fn path(&self) -> String {
        format!("/users/{}/payment-methods", seg(&self.user_id))
    }

    fn body(&self) -> ClientResult<Option<Value>> {
        json_body(&self.method)
    }
}

pub struct DeletePaymentMethod {
    pub payment_method_id: String,
}

impl Endpoint for DeletePaymentMethod {
    type Response = SuccessResponse;
    const METHOD: Method = Method::DELETE;

    fn path(&self) -> String {
        format!("/payment-methods/{}", seg(&self.payment_method_id))
    }
}

// ==================== Favorites ====================

pub struct ListFavorites {
    pub user_id: String,
}

impl Endpoint for ListFavorites {
    type Response = Vec<String>;
    const METHOD: Method = Method::GET;

    fn path(&self) -> String {
        format!("/users/{}/favorites", seg(&self.user_id))
    }
}

pub struct AddFavorite {
    pub user_id: String,
    pub restaurant_id: String,
}

impl Endpoint for AddFavorite {
    type Response = Vec<String>;
    const METHOD: Method = Method::POST;

    fn path(&self) -> String {
        format!("/users/{}/favorites", seg(&self.user_id))
    }

    fn body(&self) -> ClientResult<Option<Value>> {
        json_body(&FavoriteAdd {
            restaurant_id: self.restaurant_id.clone(),
        })
    }
}

pub struct RemoveFavorite {
    pub user_id: String,
    pub restaurant_id: String,
}

impl Endpoint for RemoveFavorite {
    type Response = Vec<String>;
    const METHOD: Method = Method::DELETE;

    fn path(&self) -> String {
        format!(
            "/users/{}/favorites/{}",
            seg(&self.user_id),
            seg(&self.restaurant_id)
        )
    }
}

// ==================== Coupons ====================

pub struct ListCoupons;

impl Endpoint for ListCoupons {
    type Response = Vec<Coupon>;
    const METHOD: Method = Method::GET;

    fn path(&self) -> String {
        "/coupons".to_string()
    }
}

pub struct ValidateCoupon {
    pub code: String,
    pub user_id: String,
    pub order_amount: Decimal,
}

impl Endpoint for ValidateCoupon {
    type Response = CouponValidation;
    const METHOD: Method = Method::POST;

    fn path(&self) -> String {
        format!("/coupons/{}/validate", seg(self.code.trim()))
    }

    fn body(&self) -> ClientResult<Option<Value>> {
        json_body(&CouponValidateRequest {
            user_id: self.user_id.clone(),
            order_amount: self.order_amount,
        })
    }
}

// ==================== Notifications & reviews ====================

pub struct ListNotifications {
    pub user_id: String,
}

impl Endpoint for ListNotifications {
    type Response = Vec<Notification>;
    const METHOD: Method = Method::GET;

    fn path(&self) -> String {
        format!("/users/{}/notifications", seg(&self.user_id))
    }
}

pub struct MarkNotificationRead {
    pub notification_id: String,
}

impl Endpoint for MarkNotificationRead {
    type Response = Notification;
    const METHOD: Method = Method::PUT;

    fn path(&self) -> String {
        format!("/notifications/{}/read", seg(&self.notification_id))
    }
}

pub struct MarkAllNotificationsRead {
    pub user_id: String,
}

impl Endpoint for MarkAllNotificationsRead {
    type Response = SuccessResponse;
    const METHOD: Method = Method::PUT;

    fn path(&self) -> String {
        format!("/users/{}/notifications/read-all", seg(&self.user_id))
    }
}

pub struct CreateReview(pub ReviewCreate);

impl Endpoint for CreateReview {
    type Response = Review;
    const METHOD: Method = Method::POST;

    fn path(&self) -> String {
        "/reviews".to_string()
    }

    fn body(&self) -> ClientResult<Option<Value>> {
        json_body(&self.0)
    }
}

pub struct UserReviews {
    pub user_id: String,
}

impl Endpoint for UserReviews {
    type Response = Vec<Review>;
    const METHOD: Method = Method::GET;

    fn path(&self) -> String {
        format!("/users/{}/reviews", seg(&self.user_id))
    }
}

// ==================== Dashboards ====================

pub struct AdminOrders;

impl Endpoint for AdminOrders {
    type Response = Vec<Order>;
    const METHOD: Method = Method::GET;

    fn path(&self) -> String {
        "/admin/orders".to_string()
    }
}

pub struct AdminStats;

impl Endpoint for AdminStats {
    type Response = OrderStats;
    const METHOD: Method = Method::GET;

    fn path(&self) -> String {
        "/admin/stats".to_string()
    }
}

pub struct AdminUsers;

impl Endpoint for AdminUsers {
    type Response = Vec<User>;
    const METHOD: Method = Method::GET;

    fn path(&self) -> String {
        "/admin/users".to_string()
    }
}

pub struct SetUserStatus {
    pub user_id: String,
    pub is_active: bool,
}

impl Endpoint for SetUserStatus {
    type Response = User;
    const METHOD: Method = Method::PUT;

    fn path(&self) -> String {
        format!("/admin/users/{}/status", seg(&self.user_id))
    }

    fn body(&self) -> ClientResult<Option<Value>> {
        json_body(&UserStatusUpdate {
            is_active: self.is_active,
        })
    }
}

pub struct OwnerOrders {
    pub restaurant_id: String,
}

impl Endpoint for OwnerOrders {
    type Response = Vec<Order>;
    const METHOD: Method = Method::GET;

    fn path(&self) -> String {
        format!("/owner/restaurants/{}/orders", seg(&self.restaurant_id))
    }
}

pub struct OwnerDashboard {
    pub restaurant_id: String,
}

impl Endpoint for OwnerDashboard {
    type Response = OwnerStats;
    const METHOD: Method = Method::GET;

    fn path(&self) -> String {
        format!("/owner/restaurants/{}/stats", seg(&self.restaurant_id))
    }
}

pub struct AdminRestaurants;

impl Endpoint for AdminRestaurants {
    type Response = Vec<Restaurant>;
    const METHOD: Method = Method::GET;

    fn path(&self) -> String {
        "/admin/restaurants".to_string()
    }
}

pub struct SetRestaurantStatus {
    pub restaurant_id: String,
    pub is_active: bool,
}

impl Endpoint for SetRestaurantStatus {
    type Response = Restaurant;
    const METHOD: Method = Method::PUT;

    fn path(&self) -> String {
        format!("/admin/restaurants/{}/status", seg(&self.restaurant_id))
    }

    fn body(&self) -> ClientResult<Option<Value>> {
        json_body(&RestaurantStatusUpdate {
            is_active: self.is_active,
        })
    }
}

pub struct UpdateRestaurant {
    pub restaurant_id: String,
    pub update: RestaurantUpdate,
}

impl Endpoint for UpdateRestaurant {
    type Response = Restaurant;
    const METHOD: Method = Method::PUT;

    fn path(&self) -> String {
        format!("/owner/restaurants/{}", seg(&self.restaurant_id))
    }

    fn body(&self) -> ClientResult<Option<Value>> {
        json_body(&self.update)
    }
}

/// Every item of the restaurant, unavailable ones included
pub struct OwnerMenu {
    pub restaurant_id: String,
}

impl Endpoint for OwnerMenu {
    type Response = Vec<MenuItem>;
    const METHOD: Method = Method::GET;

    fn path(&self) -> String {
        format!("/owner/restaurants/{}/menu", seg(&self.restaurant_id))
    }
}

pub struct CreateMenuItem {
    pub restaurant_id: String,
    pub item: MenuItemCreate,
}

impl Endpoint for CreateMenuItem {
    type Response = MenuItem;
    const METHOD: Method = Method::POST;

    fn path(&self) -> String {
        format!("/owner/restaurants/{}/menu", seg(&self.restaurant_id))
    }

    fn body(&self) -> ClientResult<Option<Value>> {
        json_body(&self.item)
    }
}

pub struct UpdateMenuItem {
    pub id: String,
    pub update: MenuItemUpdate,
}

impl Endpoint for UpdateMenuItem {
    type Response = MenuItem;
    const METHOD: Method = Method::PUT;

    fn path(&self) -> String {
        format!("/owner/menu/{}", seg(&self.id))
    }

    fn body(&self) -> ClientResult<Option<Value>> {
        json_body(&self.update)
    }
}

pub struct DeleteMenuItem {
    pub id: String,
}

impl Endpoint for DeleteMenuItem {
    type Response = MenuItem;
    const METHOD: Method = Method::DELETE;

    fn path(&self) -> String {
        format!("/owner/menu/{}", seg(&self.id))
    }
}
