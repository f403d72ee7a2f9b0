//! Payment Method Model
//!
//! Payment methods are display-only records; nothing here charges money.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Payment method kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentKind {
    CreditCard,
    DebitCard,
    Upi,
    Wallet,
    Cash,
}

impl PaymentKind {
    /// Cash is collected on delivery; every other kind is prepaid.
    pub fn is_prepaid(&self) -> bool {
        !matches!(self, PaymentKind::Cash)
    }
}

/// Saved payment method entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentMethod {
    pub id: String,
    pub user_id: String,
    #[serde(rename = "type")]
    pub kind: PaymentKind,
    pub provider: String,
    /// Masked card number or UPI handle
    pub display_number: Option<String>,
    pub holder_name: Option<String>,
    pub expiry_month: Option<String>,
    pub expiry_year: Option<String>,
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
}

/// Create payment method payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PaymentMethodCreate {
    #[serde(rename = "type")]
    pub kind: PaymentKind,
    #[validate(length(min = 1, max = 50, message = "provider is required"))]
    pub provider: String,
    #[serde(default)]
    pub display_number: Option<String>,
    #[serde(default)]
    pub holder_name: Option<String>,
    #[serde(default)]
    pub expiry_month: Option<String>,
    #[serde(default)]
    pub expiry_year: Option<String>,
    #[serde(default)]
    pub is_default: bool,
}

/// Mask all but the last four digits of a card number
pub fn mask_card_number(number: &str) -> String {
    let digits: Vec<char> = number.chars().filter(|c| c.is_ascii_digit()).collect();
    let tail: String = digits[digits.len().saturating_sub(4)..].iter().collect();
    format!("**** **** **** {tail}")
}
