//! End-to-end client behaviour against the in-process backend

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use http::Method;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use serde_json::{Value, json};
use tokio::sync::Notify;

use feast_client::endpoints::{GetWallet, ListRestaurants, TopUpWallet, UserOrders, UserTransactions};
use feast_client::store::{FileStore, KeyValueStore, MemoryStore};
use feast_client::{
    ApiRequest, BackendClient, CheckoutDetails, ClientError, ClientResult, FallbackBackend,
    LocalBackend, Navigator, NetworkBackend, Storefront,
};
use shared::cart::{AddItemOutcome, CartItem};
use shared::client::TokenResponse;
use shared::error::ErrorCode;
use shared::models::{RestaurantFilter, TopUpRequest, TransactionKind};
use shared::order::{OrderStatus, PaymentChoice};

#[derive(Default)]
struct CountingNavigator {
    visits: AtomicUsize,
    last: Mutex<Option<String>>,
}

impl Navigator for CountingNavigator {
    fn navigate(&self, path: &str) {
        self.visits.fetch_add(1, Ordering::SeqCst);
        *self.last.lock() = Some(path.to_string());
    }
}

/// Local backend with injectable failures
#[derive(Debug, Default)]
struct Script {
    /// Create the next order, then report a dropped connection
    drop_next_order_response: AtomicBool,
    /// Hold order creation until notified
    order_gate: Mutex<Option<Arc<Notify>>>,
    fail_favorites: AtomicBool,
    /// Restaurant ids whose favorite mutations fail
    failing_favorites: Mutex<HashSet<String>>,
    /// Hold a restaurant's favorite mutations until notified
    favorite_gates: Mutex<HashMap<String, Arc<Notify>>>,
}

impl Script {
    fn gate_favorite(&self, restaurant_id: &str) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.favorite_gates
            .lock()
            .insert(restaurant_id.to_string(), gate.clone());
        gate
    }

    fn fail_favorite(&self, restaurant_id: &str) {
        self.failing_favorites.lock().insert(restaurant_id.to_string());
    }
}

/// Restaurant a favorite mutation is about: the body for adds, the last
/// path segment for removals
fn favorite_target(request: &ApiRequest) -> String {
    request
        .body
        .as_ref()
        .and_then(|b| b["restaurant_id"].as_str())
        .map(str::to_string)
        .or_else(|| request.route().rsplit('/').next().map(str::to_string))
        .unwrap_or_default()
}

#[derive(Debug)]
struct Scripted {
    local: LocalBackend,
    script: Arc<Script>,
}

#[async_trait]
impl BackendClient for Scripted {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn send(&self, request: &ApiRequest) -> ClientResult<Value> {
        let favorite_mutation =
            request.route().contains("/favorites") && request.method != Method::GET;
        if favorite_mutation {
            let target = favorite_target(request);
            let gate = self.script.favorite_gates.lock().get(&target).cloned();
            if let Some(gate) = gate {
                gate.notified().await;
            }
            if self.script.fail_favorites.load(Ordering::SeqCst)
                || self.script.failing_favorites.lock().contains(&target)
            {
                return Err(ClientError::Network("connection reset".into()));
            }
        }

        if request.method == Method::POST && request.route() == "/orders" {
            let gate = self.script.order_gate.lock().clone();
            if let Some(gate) = gate {
                gate.notified().await;
            }
        }

        let result = self.local.send(request).await;
        if request.method == Method::POST
            && request.route() == "/orders"
            && self.script.drop_next_order_response.swap(false, Ordering::SeqCst)
        {
            return Err(ClientError::Network("connection reset".into()));
        }
        result
    }
}

fn storefront() -> (Storefront, Arc<Script>, Arc<CountingNavigator>) {
    let script = Arc::new(Script::default());
    let backend = Scripted {
        local: LocalBackend::seeded().unwrap(),
        script: script.clone(),
    };
    let navigator = Arc::new(CountingNavigator::default());
    let storefront = Storefront::assemble(
        Arc::new(backend),
        Arc::new(MemoryStore::new()),
        navigator.clone(),
        "/login",
    );
    (storefront, script, navigator)
}

async fn signed_in() -> (Storefront, Arc<Script>, Arc<CountingNavigator>) {
    let (storefront, script, navigator) = storefront();
    storefront
        .client
        .login("john.doe@example.com", "password123")
        .await
        .unwrap();
    (storefront, script, navigator)
}

fn d(v: &str) -> Decimal {
    v.parse().unwrap()
}

fn fill_cart(storefront: &Storefront) {
    let pizza = CartItem::new("1", "Margherita Pizza", d("12.99"), "1")
        .unwrap()
        .with_restaurant_name("Pizza Palace")
        .vegetarian(true);
    assert_eq!(storefront.cart.add_item(pizza.clone()), AddItemOutcome::Added);
    assert_eq!(
        storefront.cart.add_item(pizza),
        AddItemOutcome::Incremented { quantity: 2 }
    );
    let bread = CartItem::new("3", "Garlic Bread", d("9.99"), "1").unwrap();
    assert_eq!(storefront.cart.add_item(bread), AddItemOutcome::Added);
}

#[tokio::test]
async fn test_restaurants_filtered_through_local_backend() {
    let (storefront, _, _) = storefront();
    let list = storefront
        .client
        .call(&ListRestaurants {
            filter: RestaurantFilter {
                city: Some("Bangalore".into()),
                ..Default::default()
            },
        })
        .await
        .unwrap();
    assert_eq!(list.len(), 2);
    assert!(list.iter().all(|r| r.city == "Bangalore"));
}

#[tokio::test]
async fn test_unknown_path_is_route_not_found() {
    let (storefront, _, _) = storefront();
    let err = storefront
        .client
        .request(Method::GET, "/menu/items/all", None)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::RouteNotFound { ref path, .. } if path == "/menu/items/all"));
    assert_eq!(err.code(), ErrorCode::RouteNotFound);
}

#[tokio::test]
async fn test_known_path_with_wrong_method_is_route_not_found() {
    let (storefront, _, _) = signed_in().await;
    for (method, path) in [
        (Method::DELETE, "/restaurants"),
        (Method::PATCH, "/orders/user/user_001"),
        (Method::GET, "/coupons/SAVE20/validate"),
    ] {
        let err = storefront
            .client
            .request(method.clone(), path, None)
            .await
            .unwrap_err();
        assert!(
            matches!(err, ClientError::RouteNotFound { path: ref p, .. } if p == path),
            "{method} {path}: {err:?}"
        );
    }
}

#[tokio::test]
async fn test_fallback_serves_same_data_when_network_is_down() {
    let local = Arc::new(LocalBackend::seeded().unwrap());
    let unreachable = Arc::new(NetworkBackend::new("http://127.0.0.1:9", 2).unwrap());
    let fallback = FallbackBackend::new(unreachable, local.clone());

    let request = ApiRequest::get("/restaurants?city=Delhi");
    let direct = local.send(&request).await.unwrap();
    let via_fallback = fallback.send(&request).await.unwrap();
    assert_eq!(direct, via_fallback);
    assert_eq!(via_fallback.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_rejected_token_redirects_once_per_session() {
    let (storefront, _, navigator) = storefront();
    let bogus = |storefront: &Storefront| {
        let tokens: TokenResponse = serde_json::from_value(json!({
            "access_token": "mock_token_nobody",
            "refresh_token": "mock_refresh_nobody",
            "user": {
                "id": "nobody", "name": "Nobody", "email": "nobody@example.com",
                "role": "customer", "profile_image": null, "is_active": true,
                "created_at": "2024-12-01T10:00:00Z"
            }
        }))
        .unwrap();
        storefront.client.auth().sign_in(tokens);
    };

    bogus(&storefront);
    assert!(storefront.client.me().await.unwrap_err().is_unauthorized());
    assert!(!storefront.client.auth().is_authenticated());
    assert_eq!(navigator.visits.load(Ordering::SeqCst), 1);
    assert_eq!(navigator.last.lock().as_deref(), Some("/login"));

    // a second expiry before any successful login does not navigate again
    bogus(&storefront);
    assert!(storefront.client.me().await.is_err());
    assert_eq!(navigator.visits.load(Ordering::SeqCst), 1);

    // wrong password carries no token and never redirects
    assert!(
        storefront
            .client
            .login("john.doe@example.com", "wrong")
            .await
            .is_err()
    );
    assert_eq!(navigator.visits.load(Ordering::SeqCst), 1);

    storefront
        .client
        .login("john.doe@example.com", "password123")
        .await
        .unwrap();
    bogus(&storefront);
    assert!(storefront.client.me().await.is_err());
    assert_eq!(navigator.visits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_checkout_clears_cart_after_success() {
    let (storefront, _, _) = signed_in().await;
    fill_cart(&storefront);

    let order = storefront
        .checkout
        .place_order(CheckoutDetails::new("742 Evergreen Terrace", PaymentChoice::Card))
        .await
        .unwrap();
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.subtotal, d("35.97"));
    assert_eq!(order.total_amount, d("86.77"));
    assert!(storefront.cart.snapshot().is_empty());
    assert_eq!(storefront.checkout.pending_request_id(), None);
}

#[tokio::test]
async fn test_wallet_checkout_needs_balance() {
    let (storefront, _, _) = signed_in().await;
    fill_cart(&storefront);
    storefront.cart.update_quantity("1", 6).unwrap();

    let err = storefront
        .checkout
        .place_order(CheckoutDetails::new("742 Evergreen Terrace", PaymentChoice::Wallet))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::InsufficientBalance);
    assert_eq!(storefront.cart.item_count(), 7);

    let wallet = storefront
        .client
        .call(&TopUpWallet {
            user_id: "user_001".into(),
            request: TopUpRequest {
                amount: d("100"),
                payment_method: None,
            },
        })
        .await
        .unwrap();
    assert_eq!(wallet.balance, d("225.50"));

    let order = storefront
        .checkout
        .place_order(CheckoutDetails::new("742 Evergreen Terrace", PaymentChoice::Wallet))
        .await
        .unwrap();
    assert!(storefront.cart.snapshot().is_empty());
    let wallet = storefront
        .client
        .call(&GetWallet {
            user_id: "user_001".into(),
        })
        .await
        .unwrap();
    assert_eq!(wallet.balance, d("225.50") - order.total_amount);

    let history = storefront
        .client
        .call(&UserTransactions {
            user_id: "user_001".into(),
        })
        .await
        .unwrap();
    assert_eq!(history[0].kind, TransactionKind::Payment);
    assert_eq!(history[0].order_id.as_deref(), Some(order.id.as_str()));
}

#[tokio::test]
async fn test_checkout_keeps_lines_added_in_flight() {
    let (storefront, script, _) = signed_in().await;
    fill_cart(&storefront);
    let gate = Arc::new(Notify::new());
    *script.order_gate.lock() = Some(gate.clone());

    let placing = {
        let storefront = storefront.clone();
        tokio::spawn(async move {
            storefront
                .checkout
                .place_order(CheckoutDetails::new("742 Evergreen Terrace", PaymentChoice::Card))
                .await
        })
    };
    while storefront.checkout.pending_request_id().is_none() {
        tokio::task::yield_now().await;
    }

    let pizza = CartItem::new("1", "Margherita Pizza", d("12.99"), "1").unwrap();
    let tiramisu = CartItem::new("4", "Tiramisu", d("7.49"), "1").unwrap();
    assert!(matches!(storefront.cart.add_item(pizza), AddItemOutcome::Incremented { quantity: 3 }));
    assert_eq!(storefront.cart.add_item(tiramisu), AddItemOutcome::Added);

    gate.notify_one();
    let order = placing.await.unwrap().unwrap();
    assert_eq!(order.subtotal, d("35.97"));

    let cart = storefront.cart.snapshot();
    assert_eq!(cart.items().len(), 2);
    assert_eq!(cart.get("1").unwrap().quantity(), 1);
    assert_eq!(cart.get("4").unwrap().quantity(), 1);
    assert!(cart.get("3").is_none());
}

#[tokio::test]
async fn test_checkout_retry_reuses_request_id() {
    let (storefront, script, _) = signed_in().await;
    fill_cart(&storefront);
    let before = storefront
        .client
        .call(&UserOrders {
            user_id: "user_001".into(),
        })
        .await
        .unwrap()
        .len();

    script.drop_next_order_response.store(true, Ordering::SeqCst);
    let details = CheckoutDetails::new("742 Evergreen Terrace", PaymentChoice::Upi);
    let err = storefront
        .checkout
        .place_order(details.clone())
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Network(_)));
    assert_eq!(storefront.cart.item_count(), 3);
    let request_id = storefront.checkout.pending_request_id().unwrap();

    let order = storefront.checkout.place_order(details).await.unwrap();
    assert_eq!(order.request_id, Some(request_id));
    assert!(storefront.cart.snapshot().is_empty());

    let after = storefront
        .client
        .call(&UserOrders {
            user_id: "user_001".into(),
        })
        .await
        .unwrap();
    assert_eq!(after.len(), before + 1);
    assert_eq!(after[0].id, order.id);
}

#[tokio::test]
async fn test_rejected_coupon_keeps_cart() {
    let (storefront, _, _) = signed_in().await;
    fill_cart(&storefront);

    let err = storefront.checkout.validate_coupon("first50").await.unwrap_err();
    assert_eq!(err.coupon_error(), Some(ErrorCode::CouponNotEligible));

    let err = storefront
        .checkout
        .place_order(
            CheckoutDetails::new("742 Evergreen Terrace", PaymentChoice::Cash).with_coupon("FIRST50"),
        )
        .await
        .unwrap_err();
    assert_eq!(err.coupon_error(), Some(ErrorCode::CouponNotEligible));
    assert_eq!(storefront.cart.item_count(), 3);

    let validation = storefront.checkout.validate_coupon("FREESHIP").await.unwrap();
    assert_eq!(validation.discount, d("49"));
}

#[tokio::test]
async fn test_checkout_requires_login_and_items() {
    let (storefront, _, _) = storefront();
    fill_cart(&storefront);
    let err = storefront
        .checkout
        .place_order(CheckoutDetails::new("somewhere", PaymentChoice::Cash))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized(_)));
    assert_eq!(storefront.cart.item_count(), 3);

    let (storefront, _, _) = signed_in().await;
    let err = storefront
        .checkout
        .place_order(CheckoutDetails::new("somewhere", PaymentChoice::Cash))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));
}

#[tokio::test]
async fn test_reorder_fills_cart_at_purchase_prices() {
    let (storefront, _, _) = signed_in().await;
    let history = storefront
        .client
        .call(&UserOrders {
            user_id: "user_001".into(),
        })
        .await
        .unwrap();
    let delivered = history
        .iter()
        .find(|o| o.status == OrderStatus::Delivered)
        .unwrap();

    storefront.reorder(delivered).unwrap();
    let cart = storefront.cart.snapshot();
    assert_eq!(cart.restaurant_id(), Some(delivered.restaurant_id.as_str()));
    assert_eq!(cart.total(), delivered.subtotal);
}

#[tokio::test]
async fn test_favorite_toggle_is_optimistic() {
    let (storefront, _, _) = signed_in().await;
    storefront
        .favorites
        .refresh(&storefront.client, "user_001")
        .await
        .unwrap();
    assert_eq!(storefront.favorites.snapshot(), vec!["1", "3", "6"]);

    let list = storefront.toggle_favorite("2").await.unwrap();
    assert_eq!(list, vec!["1", "3", "6", "2"]);
    let list = storefront.toggle_favorite("1").await.unwrap();
    assert_eq!(list, vec!["3", "6", "2"]);
}

#[tokio::test]
async fn test_failed_favorite_toggle_rolls_back() {
    let (storefront, script, _) = signed_in().await;
    storefront
        .favorites
        .refresh(&storefront.client, "user_001")
        .await
        .unwrap();

    script.fail_favorites.store(true, Ordering::SeqCst);
    let err = storefront.toggle_favorite("3").await.unwrap_err();
    assert!(matches!(err, ClientError::Network(_)));
    assert_eq!(storefront.favorites.snapshot(), vec!["1", "3", "6"]);
}

#[tokio::test]
async fn test_favorite_toggle_rejects_reentry() {
    let (storefront, script, _) = signed_in().await;
    let gate = script.gate_favorite("5");

    let first = {
        let storefront = storefront.clone();
        tokio::spawn(async move { storefront.toggle_favorite("5").await })
    };
    while !storefront.executor.is_busy("favorite:user_001:5") {
        tokio::task::yield_now().await;
    }
    assert!(storefront.favorites.contains("5"));

    let err = storefront.toggle_favorite("5").await.unwrap_err();
    assert!(matches!(err, ClientError::Busy(_)));
    assert!(storefront.favorites.contains("5"));

    gate.notify_one();
    let list = first.await.unwrap().unwrap();
    assert!(list.contains(&"5".to_string()));
}

async fn spawn_toggle(
    storefront: &Storefront,
    restaurant_id: &'static str,
) -> tokio::task::JoinHandle<ClientResult<Vec<String>>> {
    let task = {
        let storefront = storefront.clone();
        tokio::spawn(async move { storefront.toggle_favorite(restaurant_id).await })
    };
    let key = format!("favorite:user_001:{restaurant_id}");
    while !storefront.executor.is_busy(&key) {
        tokio::task::yield_now().await;
    }
    task
}

#[tokio::test]
async fn test_overlapping_failed_toggles_each_roll_back() {
    let (storefront, script, _) = signed_in().await;
    storefront
        .favorites
        .refresh(&storefront.client, "user_001")
        .await
        .unwrap();
    let gate_two = script.gate_favorite("2");
    let gate_four = script.gate_favorite("4");
    script.fail_favorite("2");
    script.fail_favorite("4");

    let two = spawn_toggle(&storefront, "2").await;
    let four = spawn_toggle(&storefront, "4").await;
    assert_eq!(storefront.favorites.snapshot(), vec!["1", "3", "6", "2", "4"]);

    gate_two.notify_one();
    assert!(matches!(two.await.unwrap(), Err(ClientError::Network(_))));
    assert_eq!(storefront.favorites.snapshot(), vec!["1", "3", "6", "4"]);

    gate_four.notify_one();
    assert!(matches!(four.await.unwrap(), Err(ClientError::Network(_))));
    assert_eq!(storefront.favorites.snapshot(), vec!["1", "3", "6"]);
}

#[tokio::test]
async fn test_success_keeps_other_toggles_in_flight() {
    let (storefront, script, _) = signed_in().await;
    storefront
        .favorites
        .refresh(&storefront.client, "user_001")
        .await
        .unwrap();
    let gate_three = script.gate_favorite("3");
    let gate_four = script.gate_favorite("4");
    script.fail_favorite("3");

    let three = spawn_toggle(&storefront, "3").await;
    let four = spawn_toggle(&storefront, "4").await;
    assert_eq!(storefront.favorites.snapshot(), vec!["1", "6", "4"]);

    // the server's answer for "4" still has "3", the local removal stays
    gate_four.notify_one();
    let list = four.await.unwrap().unwrap();
    assert_eq!(list, vec!["1", "6", "4"]);

    // the failed removal puts "3" back where it was
    gate_three.notify_one();
    assert!(three.await.unwrap().is_err());
    assert_eq!(storefront.favorites.snapshot(), vec!["1", "3", "6", "4"]);

    let server = storefront
        .favorites
        .refresh(&storefront.client, "user_001")
        .await
        .unwrap();
    assert_eq!(server, vec!["1", "3", "6", "4"]);
}

#[tokio::test]
async fn test_session_and_cart_survive_restart() {
    let dir = tempfile::tempdir().unwrap();
    let open = || -> Storefront {
        let storage: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(dir.path()).unwrap());
        Storefront::assemble(
            Arc::new(LocalBackend::seeded().unwrap()),
            storage,
            Arc::new(CountingNavigator::default()),
            "/login",
        )
    };

    let first = open();
    first
        .client
        .login("jane.smith@example.com", "password123")
        .await
        .unwrap();
    fill_cart(&first);
    drop(first);

    let second = open();
    assert!(second.client.auth().is_authenticated());
    assert_eq!(second.client.current_user().unwrap().id, "user_002");
    assert_eq!(second.cart.item_count(), 3);
    assert_eq!(second.cart.total(), d("35.97"));
    assert_eq!(second.client.me().await.unwrap().name, "Jane Smith");

    second.client.logout();
    second.cart.clear();
    let third = open();
    assert!(!third.client.auth().is_authenticated());
    assert!(third.cart.snapshot().is_empty());
}
