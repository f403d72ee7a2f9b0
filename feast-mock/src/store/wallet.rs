use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{TopUpRequest, Transaction, TransactionKind, WalletBalance};
use shared::order::{Order, PaymentChoice};
use shared::util::prefixed_id;

use super::{MockStore, newest_first, user_not_found};

fn transaction(
    user_id: &str,
    order_id: Option<&str>,
    kind: TransactionKind,
    amount: Decimal,
    payment_method: &str,
    now: DateTime<Utc>,
) -> Transaction {
    Transaction {
        id: prefixed_id("TXN"),
        user_id: user_id.to_string(),
        order_id: order_id.map(str::to_string),
        kind,
        amount,
        payment_method: payment_method.to_string(),
        transaction_ref: format!("TXN_REF_{}", now.format("%Y%m%d%H%M%S")),
        created_at: now,
    }
}

impl MockStore {
    pub fn wallet(&self, user_id: &str) -> AppResult<WalletBalance> {
        let user = self.user(user_id)?;
        Ok(WalletBalance {
            balance: user.wallet_balance,
            loyalty_points: user.loyalty_points,
        })
    }

    /// A user's transactions, newest first
    pub fn transactions_for_user(&self, user_id: &str) -> Vec<Transaction> {
        let rows = self
            .transactions
            .read()
            .iter()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect();
        newest_first(rows, |t: &Transaction| t.created_at)
    }

    /// Add money to a wallet and record the top-up
    pub fn top_up(
        &self,
        user_id: &str,
        request: &TopUpRequest,
        now: DateTime<Utc>,
    ) -> AppResult<WalletBalance> {
        request.check()?;
        let source = request.payment_method.as_deref().unwrap_or("Card");
        let balance = self.adjust_wallet(user_id, request.amount)?;
        self.transactions.write().push(transaction(
            user_id,
            None,
            TransactionKind::WalletTopup,
            request.amount,
            source,
            now,
        ));
        tracing::info!(%user_id, amount = %request.amount, "Wallet topped up");
        Ok(balance)
    }

    /// Record the payment of a new prepaid order, taking wallet payments
    /// out of the balance
    ///
    /// Fails with `InsufficientBalance` and records nothing when the wallet
    /// does not cover the total.
    pub(super) fn charge(&self, order: &Order, now: DateTime<Utc>) -> AppResult<()> {
        if !order.payment_method.is_prepaid() {
            return Ok(());
        }
        if order.payment_method == PaymentChoice::Wallet {
            self.adjust_wallet(&order.user_id, -order.total_amount)?;
        }
        self.transactions.write().push(transaction(
            &order.user_id,
            Some(&order.id),
            TransactionKind::Payment,
            order.total_amount,
            order.payment_method.label(),
            now,
        ));
        Ok(())
    }

    /// Record the refund of a cancelled prepaid order; wallet payments go
    /// back into the wallet
    pub(super) fn refund(&self, order: &Order, now: DateTime<Utc>) -> AppResult<()> {
        if !order.payment_method.is_prepaid() {
            return Ok(());
        }
        if order.payment_method == PaymentChoice::Wallet {
            self.adjust_wallet(&order.user_id, order.total_amount)?;
        }
        self.transactions.write().push(transaction(
            &order.user_id,
            Some(&order.id),
            TransactionKind::Refund,
            order.total_amount,
            order.payment_method.label(),
            now,
        ));
        Ok(())
    }

    /// Add `delta` to a balance; a balance never goes below zero
    fn adjust_wallet(&self, user_id: &str, delta: Decimal) -> AppResult<WalletBalance> {
        let mut users = self.users.write();
        let record = users
            .iter_mut()
            .find(|r| r.user.id == user_id)
            .ok_or_else(|| user_not_found(user_id))?;
        let next = record.user.wallet_balance + delta;
        if next < Decimal::ZERO {
            return Err(AppError::new(ErrorCode::InsufficientBalance)
                .with_detail("balance", record.user.wallet_balance.to_string())
                .with_detail("required", (-delta).to_string()));
        }
        record.user.wallet_balance = next;
        Ok(WalletBalance {
            balance: next,
            loyalty_points: record.user.loyalty_points,
        })
    }
}
