//! Menu Item Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};

/// Menu item entity (catalog row)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    pub restaurant_id: String,
    pub name: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub category: String,
    pub is_veg: bool,
    pub is_available: bool,
    pub image_url: Option<String>,
}

impl MenuItem {
    pub fn apply(&mut self, update: MenuItemUpdate) {
        if let Some(v) = update.name {
            self.name = v.trim().to_string();
        }
        if let Some(v) = update.description {
            self.description = v;
        }
        if let Some(v) = update.price {
            self.price = v;
        }
        if let Some(v) = update.category {
            self.category = v;
        }
        if let Some(v) = update.is_veg {
            self.is_veg = v;
        }
        if let Some(v) = update.is_available {
            self.is_available = v;
        }
        if let Some(v) = update.image_url {
            self.image_url = Some(v).filter(|s| !s.is_empty());
        }
    }
}

fn check_price(price: Decimal) -> AppResult<()> {
    if price < Decimal::ZERO {
        return Err(AppError::validation("price must not be negative")
            .with_detail("price", price.to_string()));
    }
    Ok(())
}

/// New menu item; the restaurant comes from the route
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MenuItemCreate {
    #[validate(length(min = 1, max = 100, message = "name is required"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[validate(length(min = 1, message = "category is required"))]
    pub category: String,
    #[serde(default)]
    pub is_veg: bool,
    #[serde(default = "available")]
    pub is_available: bool,
    #[serde(default)]
    pub image_url: Option<String>,
}

fn available() -> bool {
    true
}

impl MenuItemCreate {
    pub fn check_price(&self) -> AppResult<()> {
        check_price(self.price)
    }
}

/// Partial menu item edit
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct MenuItemUpdate {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
    #[validate(length(min = 1))]
    pub category: Option<String>,
    pub is_veg: Option<bool>,
    pub is_available: Option<bool>,
    pub image_url: Option<String>,
}

impl MenuItemUpdate {
    pub fn check_price(&self) -> AppResult<()> {
        self.price.map_or(Ok(()), check_price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_create_defaults_to_available() {
        let payload: MenuItemCreate = serde_json::from_value(serde_json::json!({
            "name": "Calzone",
            "price": 11.5,
            "category": "Mains"
        }))
        .unwrap();
        assert!(payload.is_available);
        assert!(!payload.is_veg);
        assert!(payload.validate().is_ok());
        assert!(payload.check_price().is_ok());
    }

    #[test]
    fn test_negative_price_rejected() {
        let update: MenuItemUpdate = serde_json::from_value(serde_json::json!({"price": -1.0})).unwrap();
        assert_eq!(update.check_price().unwrap_err().code, ErrorCode::ValidationFailed);

        let untouched = MenuItemUpdate::default();
        assert!(untouched.check_price().is_ok());
    }
}
