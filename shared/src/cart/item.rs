//! Cart line item

use crate::error::{AppError, AppResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Maximum allowed quantity per line
pub const MAX_QUANTITY: u32 = 9999;

/// Maximum allowed unit price
pub const MAX_PRICE: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Unvalidated cart line, as sent by a caller or read back from storage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItemInput {
    pub id: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
    pub restaurant_id: String,
    #[serde(default)]
    pub restaurant_name: Option<String>,
    #[serde(default, rename = "image")]
    pub image_ref: Option<String>,
    #[serde(default, rename = "is_veg")]
    pub is_vegetarian: bool,
}

fn default_quantity() -> i64 {
    1
}

/// Validated cart line
///
/// Fields are private so a line can only exist with a non-negative price and
/// a quantity of at least one. Deserialization goes through the same checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CartItemInput")]
pub struct CartItem {
    id: String,
    name: String,
    #[serde(with = "rust_decimal::serde::float")]
    price: Decimal,
    quantity: u32,
    restaurant_id: String,
    restaurant_name: Option<String>,
    #[serde(rename = "image")]
    image_ref: Option<String>,
    #[serde(rename = "is_veg")]
    is_vegetarian: bool,
}

impl CartItem {
    /// Build a line with quantity 1
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: Decimal,
        restaurant_id: impl Into<String>,
    ) -> AppResult<Self> {
        Self::try_from(CartItemInput {
            id: id.into(),
            name: name.into(),
            price,
            quantity: 1,
            restaurant_id: restaurant_id.into(),
            restaurant_name: None,
            image_ref: None,
            is_vegetarian: false,
        })
    }

    pub fn with_restaurant_name(mut self, name: impl Into<String>) -> Self {
        self.restaurant_name = Some(name.into());
        self
    }

    pub fn with_image(mut self, image_ref: impl Into<String>) -> Self {
        self.image_ref = Some(image_ref.into());
        self
    }

    pub fn vegetarian(mut self, is_vegetarian: bool) -> Self {
        self.is_vegetarian = is_vegetarian;
        self
    }

    pub fn with_quantity(mut self, quantity: i64) -> AppResult<Self> {
        self.quantity = validate_quantity(quantity)?;
        Ok(self)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn restaurant_id(&self) -> &str {
        &self.restaurant_id
    }

    pub fn restaurant_name(&self) -> Option<&str> {
        self.restaurant_name.as_deref()
    }

    pub fn image_ref(&self) -> Option<&str> {
        self.image_ref.as_deref()
    }

    pub fn is_vegetarian(&self) -> bool {
        self.is_vegetarian
    }

    /// price × quantity, unrounded
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }

    pub(crate) fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
    }
}

pub(crate) fn validate_quantity(quantity: i64) -> AppResult<u32> {
    if quantity <= 0 {
        return Err(AppError::validation(format!(
            "quantity must be positive, got {quantity}"
        ))
        .with_detail("field", "quantity"));
    }
    if quantity > i64::from(MAX_QUANTITY) {
        return Err(AppError::validation(format!(
            "quantity exceeds maximum allowed ({MAX_QUANTITY}), got {quantity}"
        ))
        .with_detail("field", "quantity"));
    }
    Ok(quantity as u32)
}

impl TryFrom<CartItemInput> for CartItem {
    type Error = AppError;

    fn try_from(input: CartItemInput) -> Result<Self, Self::Error> {
        if input.id.trim().is_empty() {
            return Err(AppError::validation("item id is required").with_detail("field", "id"));
        }
        if input.restaurant_id.trim().is_empty() {
            return Err(AppError::validation("restaurant id is required")
                .with_detail("field", "restaurant_id"));
        }
        if input.price < Decimal::ZERO {
            return Err(AppError::validation(format!(
                "price must be non-negative, got {}",
                input.price
            ))
            .with_detail("field", "price"));
        }
        if input.price > MAX_PRICE {
            return Err(AppError::validation(format!(
                "price exceeds maximum allowed ({MAX_PRICE}), got {}",
                input.price
            ))
            .with_detail("field", "price"));
        }
        let quantity = validate_quantity(input.quantity)?;

        Ok(Self {
            id: input.id,
            name: input.name,
            price: input.price,
            quantity,
            restaurant_id: input.restaurant_id,
            restaurant_name: input.restaurant_name,
            image_ref: input.image_ref,
            is_vegetarian: input.is_vegetarian,
        })
    }
}
