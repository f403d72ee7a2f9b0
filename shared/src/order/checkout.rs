//! Checkout payload

use crate::cart::{Cart, MAX_QUANTITY};
use crate::error::{AppError, AppResult, ErrorCode};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// How the customer pays
///
/// Cash is collected on delivery; every other method is treated as prepaid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentChoice {
    #[default]
    Cash,
    #[serde(alias = "credit_card", alias = "debit_card")]
    Card,
    Upi,
    Wallet,
}

impl PaymentChoice {
    pub fn is_prepaid(&self) -> bool {
        !matches!(self, PaymentChoice::Cash)
    }

    /// Name shown on receipts and transactions
    pub fn label(&self) -> &'static str {
        match self {
            PaymentChoice::Cash => "Cash",
            PaymentChoice::Card => "Card",
            PaymentChoice::Upi => "UPI",
            PaymentChoice::Wallet => "Wallet",
        }
    }
}

/// One line of the checkout, priced from the cart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct CheckoutLine {
    #[validate(length(min = 1, message = "menu_item_id is required"))]
    pub menu_item_id: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[validate(custom(function = "validate_price"))]
    pub price: Decimal,
    #[validate(range(min = 1, max = 9999, message = "quantity must be between 1 and 9999"))]
    pub quantity: u32,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub is_veg: bool,
}

fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if *price < Decimal::ZERO {
        return Err(ValidationError::new("negative_price").with_message("price must be non-negative".into()));
    }
    Ok(())
}

/// Body of `POST /orders`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct CheckoutRequest {
    /// Idempotency key; a repeated id returns the order created first
    #[serde(default)]
    pub request_id: Option<Uuid>,
    #[validate(length(min = 1, message = "user_id is required"))]
    pub user_id: String,
    #[validate(length(min = 1, message = "restaurant_id is required"))]
    pub restaurant_id: String,
    #[serde(default)]
    pub restaurant_name: Option<String>,
    #[validate(length(min = 1, message = "order must contain at least one item"), nested)]
    pub items: Vec<CheckoutLine>,
    #[validate(length(min = 1, max = 500, message = "Please enter a delivery address"))]
    pub delivery_address: String,
    #[serde(default)]
    pub delivery_instructions: Option<String>,
    #[serde(default)]
    pub payment_method: PaymentChoice,
    #[serde(default)]
    pub coupon_code: Option<String>,
}

impl CheckoutRequest {
    /// Snapshot a cart into a checkout payload
    ///
    /// Prices are frozen from the cart lines.
    pub fn from_cart(
        cart: &Cart,
        user_id: impl Into<String>,
        delivery_address: impl Into<String>,
        payment_method: PaymentChoice,
    ) -> AppResult<Self> {
        let restaurant_id = cart
            .restaurant_id()
            .ok_or_else(|| AppError::new(ErrorCode::OrderEmpty))?
            .to_string();

        let items = cart
            .items()
            .iter()
            .map(|item| CheckoutLine {
                menu_item_id: item.id().to_string(),
                name: item.name().to_string(),
                price: item.price(),
                quantity: item.quantity().min(MAX_QUANTITY),
                image: item.image_ref().map(str::to_string),
                is_veg: item.is_vegetarian(),
            })
            .collect();

        Ok(Self {
            request_id: None,
            user_id: user_id.into(),
            restaurant_id,
            restaurant_name: cart.restaurant_name().map(str::to_string),
            items,
            delivery_address: delivery_address.into(),
            delivery_instructions: None,
            payment_method,
            coupon_code: None,
        })
    }

    pub fn with_request_id(mut self, request_id: Uuid) -> Self {
        self.request_id = Some(request_id);
        self
    }

    pub fn with_coupon(mut self, code: impl Into<String>) -> Self {
        self.coupon_code = Some(code.into());
        self
    }

    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.delivery_instructions = Some(instructions.into());
        self
    }

    /// Σ price × quantity of the lines, unrounded
    pub fn subtotal(&self) -> Decimal {
        self.items
            .iter()
            .map(|l| l.price * Decimal::from(l.quantity))
            .sum()
    }

    /// Run field validation, mapping failures to `AppError`
    pub fn check(&self) -> AppResult<()> {
        if self.items.is_empty() {
            return Err(AppError::new(ErrorCode::OrderEmpty));
        }
        self.validate()?;
        if self.delivery_address.trim().is_empty() {
            return Err(AppError::validation("Please enter a delivery address")
                .with_detail("delivery_address", "blank"));
        }
        Ok(())
    }

    /// Same lines, ignoring the idempotency key
    pub fn same_contents(&self, other: &CheckoutRequest) -> bool {
        self.user_id == other.user_id
            && self.restaurant_id == other.restaurant_id
            && self.items == other.items
            && self.delivery_address == other.delivery_address
            && self.payment_method == other.payment_method
            && self.coupon_code == other.coupon_code
            && self.delivery_instructions == other.delivery_instructions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::CartItem;

    fn cart() -> Cart {
        let mut cart = Cart::new();
        let _ = cart.add_item(
            CartItem::new("1", "Margherita", Decimal::new(1299, 2), "r1")
                .unwrap()
                .with_restaurant_name("Pizza Palace"),
        );
        let _ = cart.add_item(CartItem::new("1", "Margherita", Decimal::new(1299, 2), "r1").unwrap());
        let _ = cart.add_item(CartItem::new("2", "Garlic Bread", Decimal::new(999, 2), "r1").unwrap());
        cart
    }

    #[test]
    fn test_from_cart_freezes_lines() {
        let req = CheckoutRequest::from_cart(&cart(), "user_001", "742 Evergreen", PaymentChoice::Card)
            .unwrap();
        assert_eq!(req.restaurant_id, "r1");
        assert_eq!(req.restaurant_name.as_deref(), Some("Pizza Palace"));
        assert_eq!(req.items.len(), 2);
        assert_eq!(req.items[0].quantity, 2);
        assert_eq!(req.subtotal(), Decimal::new(3597, 2));
        assert!(req.check().is_ok());
    }

    #[test]
    fn test_empty_cart_rejected() {
        let err = CheckoutRequest::from_cart(&Cart::new(), "u", "addr", PaymentChoice::Cash)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::OrderEmpty);
    }

    #[test]
    fn test_blank_address_rejected() {
        let req = CheckoutRequest::from_cart(&cart(), "user_001", "   ", PaymentChoice::Cash).unwrap();
        assert_eq!(req.check().unwrap_err().code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn test_negative_line_price_rejected() {
        let mut req =
            CheckoutRequest::from_cart(&cart(), "user_001", "addr", PaymentChoice::Cash).unwrap();
        req.items[0].price = Decimal::new(-100, 2);
        let err = req.check().unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn test_payment_aliases() {
        let p: PaymentChoice = serde_json::from_str("\"credit_card\"").unwrap();
        assert_eq!(p, PaymentChoice::Card);
        assert!(p.is_prepaid());
        assert!(!PaymentChoice::Cash.is_prepaid());
    }

    #[test]
    fn test_same_contents_ignores_request_id() {
        let a = CheckoutRequest::from_cart(&cart(), "user_001", "addr", PaymentChoice::Cash).unwrap();
        let b = a.clone().with_request_id(Uuid::new_v4());
        assert!(a.same_contents(&b));
        let c = a.clone().with_coupon("SAVE20");
        assert!(!a.same_contents(&c));
    }
}
