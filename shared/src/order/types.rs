//! Order entity

use super::checkout::{CheckoutRequest, PaymentChoice};
use super::pricing::{FeeSchedule, OrderTotals};
use super::status::{Actor, OrderStatus, Transition, check_transition};
use crate::cart::CartItem;
use crate::error::AppResult;
use chrono::{DateTime, Datelike, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Payment state of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Refunded,
}

/// Line snapshot taken when the order was placed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    #[serde(alias = "id")]
    pub menu_item_id: String,
    pub name: String,
    /// Unit price at purchase time
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub quantity: u32,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub is_veg: bool,
}

/// Why and by whom an order was cancelled
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cancellation {
    pub reason: String,
    pub cancelled_by: Actor,
}

/// Order entity
///
/// Everything except status, status timestamps, payment status and
/// cancellation is fixed at placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub user_id: String,
    pub restaurant_id: String,
    pub restaurant_name: String,
    pub items: Vec<OrderLine>,
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub delivery_fee: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub discount: Decimal,
    #[serde(rename = "tax", with = "rust_decimal::serde::float")]
    pub tax_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    #[serde(default)]
    pub coupon_code: Option<String>,
    pub status: OrderStatus,
    pub payment_method: PaymentChoice,
    pub payment_status: PaymentStatus,
    pub delivery_address: String,
    #[serde(default)]
    pub delivery_instructions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancellation: Option<Cancellation>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub confirmed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub preparing_at: Option<DateTime<Utc>>,
    #[serde(default, alias = "picked_up_at")]
    pub out_for_delivery_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub delivered_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub cancelled_at: Option<DateTime<Utc>>,
}

/// Human-readable order id, e.g. `ORD-2025-007`
pub fn order_number(year: i32, sequence: usize) -> String {
    format!("ORD-{year}-{sequence:03}")
}

impl Order {
    /// Place a new order from a validated checkout
    ///
    /// `discount` comes from the coupon engine and is clamped so the total
    /// never goes negative.
    pub fn place(
        id: impl Into<String>,
        request: &CheckoutRequest,
        schedule: &FeeSchedule,
        discount: Decimal,
        now: DateTime<Utc>,
    ) -> AppResult<Self> {
        request.check()?;

        let items: Vec<OrderLine> = request
            .items
            .iter()
            .map(|l| OrderLine {
                menu_item_id: l.menu_item_id.clone(),
                name: l.name.clone(),
                price: l.price,
                quantity: l.quantity,
                image: l.image.clone(),
                is_veg: l.is_veg,
            })
            .collect();

        let totals = OrderTotals::compute(
            items.iter().map(|l| (l.price, l.quantity)),
            schedule,
            discount,
        );

        let payment_status = if request.payment_method.is_prepaid() {
            PaymentStatus::Paid
        } else {
            PaymentStatus::Pending
        };

        Ok(Self {
            id: id.into(),
            user_id: request.user_id.clone(),
            restaurant_id: request.restaurant_id.clone(),
            restaurant_name: request.restaurant_name.clone().unwrap_or_default(),
            items,
            subtotal: totals.subtotal,
            delivery_fee: totals.delivery_fee,
            discount: totals.discount,
            tax_amount: totals.tax_amount,
            total_amount: totals.total_amount,
            coupon_code: request
                .coupon_code
                .as_ref()
                .map(|c| c.trim().to_uppercase())
                .filter(|c| !c.is_empty()),
            status: OrderStatus::Pending,
            payment_method: request.payment_method,
            payment_status,
            delivery_address: request.delivery_address.trim().to_string(),
            delivery_instructions: request.delivery_instructions.clone(),
            request_id: request.request_id,
            cancellation: None,
            created_at: now,
            confirmed_at: None,
            preparing_at: None,
            out_for_delivery_at: None,
            delivered_at: None,
            cancelled_at: None,
        })
    }

    pub fn totals(&self) -> OrderTotals {
        OrderTotals {
            subtotal: self.subtotal,
            delivery_fee: self.delivery_fee,
            discount: self.discount,
            tax_amount: self.tax_amount,
            total_amount: self.total_amount,
        }
    }

    /// Move to `next` on behalf of `actor`, stamping the status time
    ///
    /// Entering `cancelled` this way records a generic reason.
    pub fn update_status(
        &mut self,
        next: OrderStatus,
        actor: Actor,
        now: DateTime<Utc>,
    ) -> AppResult<Transition> {
        if next == OrderStatus::Cancelled {
            return self.cancel(format!("Cancelled by {actor}"), actor, now);
        }
        let transition = check_transition(self.status, next, actor)?;
        if transition == Transition::Changed {
            self.status = next;
            self.stamp(next, now);
        }
        Ok(transition)
    }

    /// Cancel with a reason; refunds the payment state
    pub fn cancel(
        &mut self,
        reason: impl Into<String>,
        cancelled_by: Actor,
        now: DateTime<Utc>,
    ) -> AppResult<Transition> {
        let transition = check_transition(self.status, OrderStatus::Cancelled, cancelled_by)?;
        if transition == Transition::Changed {
            self.status = OrderStatus::Cancelled;
            self.stamp(OrderStatus::Cancelled, now);
            self.payment_status = PaymentStatus::Refunded;
            self.cancellation = Some(Cancellation {
                reason: reason.into(),
                cancelled_by,
            });
        }
        Ok(transition)
    }

    fn stamp(&mut self, status: OrderStatus, now: DateTime<Utc>) {
        let slot = match status {
            OrderStatus::Pending => return,
            OrderStatus::Confirmed => &mut self.confirmed_at,
            OrderStatus::Preparing => &mut self.preparing_at,
            OrderStatus::OutForDelivery => &mut self.out_for_delivery_at,
            OrderStatus::Delivered => &mut self.delivered_at,
            OrderStatus::Cancelled => &mut self.cancelled_at,
        };
        *slot = Some(now);
    }

    /// Cart lines that re-create this order at its purchase prices
    pub fn reorder_items(&self) -> AppResult<Vec<CartItem>> {
        self.items
            .iter()
            .map(|line| {
                let mut item = CartItem::new(
                    line.menu_item_id.clone(),
                    line.name.clone(),
                    line.price,
                    self.restaurant_id.clone(),
                )?
                .with_restaurant_name(self.restaurant_name.clone())
                .vegetarian(line.is_veg);
                if let Some(image) = &line.image {
                    item = item.with_image(image.clone());
                }
                item.with_quantity(i64::from(line.quantity))
            })
            .collect()
    }

    pub fn year(&self) -> i32 {
        self.created_at.year()
    }
}
