//! Checkout: turn the cart into an order, then empty the cart
//!
//! The ordered lines leave the cart only after the backend confirms the
//! order; anything added while the request was in flight stays. A retry
//! of the same cart snapshot reuses the request id, so the backend hands
//! back the order it already created instead of a duplicate.

use std::sync::Arc;

use parking_lot::Mutex;
use shared::coupon::CouponValidation;
use shared::order::{CheckoutRequest, Order, PaymentChoice};
use uuid::Uuid;

use crate::endpoints::{CreateOrder, ValidateCoupon};
use crate::error::{ClientError, ClientResult};
use crate::facade::StorefrontClient;
use crate::store::CartStore;

/// Delivery and payment details chosen at checkout
#[derive(Debug, Clone)]
pub struct CheckoutDetails {
    pub delivery_address: String,
    pub delivery_instructions: Option<String>,
    pub payment_method: PaymentChoice,
    pub coupon_code: Option<String>,
}

impl CheckoutDetails {
    pub fn new(delivery_address: impl Into<String>, payment_method: PaymentChoice) -> Self {
        Self {
            delivery_address: delivery_address.into(),
            delivery_instructions: None,
            payment_method,
            coupon_code: None,
        }
    }

    pub fn with_coupon(mut self, code: impl Into<String>) -> Self {
        self.coupon_code = Some(code.into());
        self
    }

    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.delivery_instructions = Some(instructions.into());
        self
    }
}

#[derive(Debug, Clone)]
pub struct CheckoutFlow {
    client: StorefrontClient,
    cart: CartStore,
    /// Last attempted payload, kept until an attempt succeeds
    pending: Arc<Mutex<Option<CheckoutRequest>>>,
}

impl CheckoutFlow {
    pub fn new(client: StorefrontClient, cart: CartStore) -> Self {
        Self {
            client,
            cart,
            pending: Arc::new(Mutex::new(None)),
        }
    }

    /// Check a coupon against the current cart total
    pub async fn validate_coupon(&self, code: &str) -> ClientResult<CouponValidation> {
        let user = self.signed_in_user()?;
        self.client
            .call(&ValidateCoupon {
                code: code.to_string(),
                user_id: user,
                order_amount: self.cart.total(),
            })
            .await
    }

    /// Place an order for the cart's contents
    ///
    /// Fails without touching the cart when the cart is empty, nobody is
    /// signed in or the backend rejects the order.
    pub async fn place_order(&self, details: CheckoutDetails) -> ClientResult<Order> {
        let user_id = self.signed_in_user()?;
        let cart = self.cart.snapshot();
        if cart.is_empty() {
            return Err(ClientError::Validation("Your cart is empty".to_string()));
        }

        let mut request =
            CheckoutRequest::from_cart(&cart, user_id, details.delivery_address, details.payment_method)?;
        request.delivery_instructions = details.delivery_instructions;
        request.coupon_code = details
            .coupon_code
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());
        request.check()?;

        let request_id = {
            let mut pending = self.pending.lock();
            let id = match pending.as_ref() {
                Some(previous) if previous.same_contents(&request) => {
                    previous.request_id.unwrap_or_else(Uuid::new_v4)
                }
                _ => Uuid::new_v4(),
            };
            let request = request.clone().with_request_id(id);
            *pending = Some(request);
            id
        };
        let request = request.with_request_id(request_id);

        match self.client.call(&CreateOrder(request)).await {
            Ok(order) => {
                self.pending.lock().take();
                self.cart.settle(&cart);
                tracing::info!(order_id = %order.id, %request_id, "Order placed");
                Ok(order)
            }
            Err(err) => {
                tracing::warn!(%request_id, error = %err, "Order creation failed, cart kept");
                Err(err)
            }
        }
    }

    /// Request id a retry of the current cart would reuse
    pub fn pending_request_id(&self) -> Option<Uuid> {
        self.pending.lock().as_ref().and_then(|r| r.request_id)
    }

    fn signed_in_user(&self) -> ClientResult<String> {
        self.client
            .current_user()
            .map(|u| u.id)
            .ok_or_else(|| ClientError::Unauthorized("Please log in to continue".to_string()))
    }
}
