//! In-memory tables behind the mock backend
//!
//! Every table sits behind its own `parking_lot::RwLock`. Methods are
//! synchronous and never hold a lock across an `.await`. When more than one
//! table is locked, the order is always `orders` → `coupons` → `users` →
//! `transactions` → `notifications`.

mod accounts;
mod coupons;
mod engagement;
mod orders;
mod wallet;

use std::collections::HashMap;

use parking_lot::RwLock;
use shared::coupon::Coupon;
use shared::error::{AppError, ErrorCode};
use shared::models::{Address, Notification, PaymentMethod, Review, Transaction, User};
use shared::order::{FeeSchedule, Order};
use uuid::Uuid;

pub use orders::NewOrder;

/// A user row together with its password
///
/// Only this type carries the password; everything handed out is a
/// [`User`].
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub user: User,
    pub password: String,
}

#[derive(Debug, Default)]
struct OrderTable {
    rows: Vec<Order>,
    by_request: HashMap<Uuid, String>,
}

#[derive(Debug, Default)]
pub struct MockStore {
    users: RwLock<Vec<UserRecord>>,
    orders: RwLock<OrderTable>,
    addresses: RwLock<Vec<Address>>,
    payment_methods: RwLock<Vec<PaymentMethod>>,
    /// user id → restaurant ids, in the order they were added
    favorites: RwLock<HashMap<String, Vec<String>>>,
    notifications: RwLock<Vec<Notification>>,
    reviews: RwLock<Vec<Review>>,
    coupons: RwLock<Vec<Coupon>>,
    transactions: RwLock<Vec<Transaction>>,
    fees: FeeSchedule,
}

impl MockStore {
    /// An empty store
    pub fn new(fees: FeeSchedule) -> Self {
        Self {
            fees,
            ..Default::default()
        }
    }

    pub fn fees(&self) -> &FeeSchedule {
        &self.fees
    }

    pub fn insert_user(&self, user: User, password: impl Into<String>) {
        self.users.write().push(UserRecord {
            user,
            password: password.into(),
        });
    }

    pub fn insert_coupon(&self, coupon: Coupon) {
        self.coupons.write().push(coupon);
    }

    pub fn insert_address(&self, address: Address) {
        self.addresses.write().push(address);
    }

    pub fn insert_payment_method(&self, method: PaymentMethod) {
        self.payment_methods.write().push(method);
    }

    pub fn insert_notification(&self, notification: Notification) {
        self.notifications.write().push(notification);
    }

    pub fn insert_review(&self, review: Review) {
        self.reviews.write().push(review);
    }

    pub fn insert_transaction(&self, transaction: Transaction) {
        self.transactions.write().push(transaction);
    }

    /// Insert an order as-is (seeding and tests)
    pub fn insert_order(&self, order: Order) {
        let mut table = self.orders.write();
        if let Some(request_id) = order.request_id {
            table.by_request.insert(request_id, order.id.clone());
        }
        table.rows.push(order);
    }
}

fn user_not_found(id: &str) -> AppError {
    AppError::with_message(ErrorCode::UserNotFound, format!("User {id} not found"))
        .with_detail("user_id", id)
}

/// Sort newest first by a timestamp key, keeping insertion order on ties
fn newest_first<T, K: Ord>(mut rows: Vec<T>, key: impl Fn(&T) -> K) -> Vec<T> {
    rows.sort_by(|a, b| key(b).cmp(&key(a)));
    rows
}
