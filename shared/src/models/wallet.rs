//! Wallet Model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Spendable balance and loyalty points of one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletBalance {
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
    pub loyalty_points: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Payment,
    Refund,
    WalletTopup,
}

/// Money moved on a user's account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub payment_method: String,
    pub transaction_ref: String,
    pub created_at: DateTime<Utc>,
}

/// Add money to a wallet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopUpRequest {
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    /// Where the money comes from, e.g. "Visa"
    #[serde(default)]
    pub payment_method: Option<String>,
}

impl TopUpRequest {
    pub fn check(&self) -> AppResult<()> {
        if self.amount <= Decimal::ZERO {
            return Err(AppError::validation("amount must be positive")
                .with_detail("amount", self.amount.to_string()));
        }
        if self.amount.normalize().scale() > 2 {
            return Err(AppError::validation("amount has more than two decimals")
                .with_detail("amount", self.amount.to_string()));
        }
        Ok(())
    }
}
