use chrono::{DateTime, Datelike, Utc};
use rust_decimal::Decimal;
use shared::coupon::{self, CouponContext};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Notification, NotificationKind};
use shared::order::{
    Actor, CheckoutRequest, Order, OrderStats, OrderStatus, OwnerStats, Transition, order_number,
};
use shared::util::prefixed_id;
use uuid::Uuid;

use super::{MockStore, newest_first};

/// Result of an order creation request
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub order: Order,
    /// The request id was seen before; `order` is the one created then
    pub replayed: bool,
}

fn order_not_found(id: &str) -> AppError {
    AppError::with_message(ErrorCode::OrderNotFound, format!("Order {id} not found"))
        .with_detail("order_id", id)
}

fn status_notification(order: &Order, now: DateTime<Utc>) -> Notification {
    let message = match order.status {
        OrderStatus::Pending => format!(
            "Your order {} from {} has been placed",
            order.id, order.restaurant_name
        ),
        OrderStatus::Cancelled => format!("Your order {} has been cancelled", order.id),
        status => format!("Your order {} is now {}", order.id, status.as_str().replace('_', " ")),
    };
    Notification {
        id: prefixed_id("NOTIF"),
        user_id: order.user_id.clone(),
        kind: NotificationKind::OrderUpdate,
        title: order.status.headline().to_string(),
        message,
        order_id: Some(order.id.clone()),
        is_read: false,
        created_at: now,
    }
}

impl MockStore {
    pub fn order(&self, id: &str) -> AppResult<Order> {
        self.orders
            .read()
            .rows
            .iter()
            .find(|o| o.id == id)
            .cloned()
            .ok_or_else(|| order_not_found(id))
    }

    /// The order created for an earlier checkout with this request id
    pub fn order_by_request(&self, request_id: Uuid) -> Option<Order> {
        let orders = self.orders.read();
        let id = orders.by_request.get(&request_id)?;
        orders.rows.iter().find(|o| &o.id == id).cloned()
    }

    /// A user's orders, newest first
    pub fn orders_for_user(&self, user_id: &str) -> Vec<Order> {
        let rows = self
            .orders
            .read()
            .rows
            .iter()
            .filter(|o| o.user_id == user_id)
            .cloned()
            .collect();
        newest_first(rows, |o: &Order| o.created_at)
    }

    /// A restaurant's orders, newest first
    pub fn orders_for_restaurant(&self, restaurant_id: &str) -> Vec<Order> {
        let rows = self
            .orders
            .read()
            .rows
            .iter()
            .filter(|o| o.restaurant_id == restaurant_id)
            .cloned()
            .collect();
        newest_first(rows, |o: &Order| o.created_at)
    }

    /// Every order, newest first
    pub fn all_orders(&self) -> Vec<Order> {
        newest_first(self.orders.read().rows.clone(), |o: &Order| o.created_at)
    }

    pub fn prior_order_count(&self, user_id: &str) -> usize {
        self.orders
            .read()
            .rows
            .iter()
            .filter(|o| o.user_id == user_id)
            .count()
    }

    pub fn order_stats(&self) -> OrderStats {
        OrderStats::from_orders(self.orders.read().rows.iter())
    }

    pub fn owner_stats(&self, restaurant_id: &str, menu_items: usize) -> OwnerStats {
        let orders = self.orders.read();
        let own = orders.rows.iter().filter(|o| o.restaurant_id == restaurant_id);
        OwnerStats::from_orders(restaurant_id, own, menu_items)
    }

    /// Create an order from a checkout payload
    ///
    /// A repeated `request_id` returns the order created the first time and
    /// changes nothing. Otherwise the coupon (if any) is validated against
    /// the user's prior orders, the order is priced and stored, the coupon
    /// use is recorded and an "Order Placed" notification is queued.
    pub fn create_order(&self, request: &CheckoutRequest, now: DateTime<Utc>) -> AppResult<NewOrder> {
        request.check()?;

        let mut orders = self.orders.write();

        if let Some(request_id) = request.request_id
            && let Some(existing) = orders
                .by_request
                .get(&request_id)
                .and_then(|id| orders.rows.iter().find(|o| &o.id == id))
        {
            tracing::info!(order_id = %existing.id, %request_id, "Replayed order creation");
            return Ok(NewOrder {
                order: existing.clone(),
                replayed: true,
            });
        }

        let prior_order_count = orders
            .rows
            .iter()
            .filter(|o| o.user_id == request.user_id)
            .count();

        let mut coupons = self.coupons.write();
        let applied = match request
            .coupon_code
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
        {
            Some(code) => {
                let ctx = CouponContext {
                    user_id: request.user_id.clone(),
                    order_amount: request.subtotal(),
                    prior_order_count,
                    delivery_fee: self.fees.delivery_fee,
                    today: now.date_naive(),
                };
                let validation = coupon::validate(&coupons, code, &ctx)?;
                Some((validation.coupon.id, validation.discount))
            }
            None => None,
        };

        let id = order_number(now.year(), orders.rows.len() + 1);
        let discount = applied.as_ref().map(|(_, d)| *d).unwrap_or(Decimal::ZERO);
        let order = Order::place(id, request, &self.fees, discount, now)?;
        self.charge(&order, now)?;

        if let Some((coupon_id, _)) = &applied
            && let Some(coupon) = coupons.iter_mut().find(|c| &c.id == coupon_id)
        {
            coupon.record_use();
        }
        drop(coupons);

        if let Some(request_id) = order.request_id {
            orders.by_request.insert(request_id, order.id.clone());
        }
        orders.rows.push(order.clone());
        self.notifications.write().push(status_notification(&order, now));

        tracing::info!(
            order_id = %order.id,
            user_id = %order.user_id,
            restaurant_id = %order.restaurant_id,
            total = %order.total_amount,
            "Order created"
        );
        Ok(NewOrder {
            order,
            replayed: false,
        })
    }

    /// Move an order to `status` as `actor`
    ///
    /// A change queues a notification for the customer; re-setting the
    /// current status changes nothing.
    pub fn update_order_status(
        &self,
        id: &str,
        status: OrderStatus,
        actor: Actor,
        now: DateTime<Utc>,
    ) -> AppResult<(Order, Transition)> {
        self.mutate_order(id, now, |order| order.update_status(status, actor, now))
    }

    pub fn cancel_order(
        &self,
        id: &str,
        reason: &str,
        actor: Actor,
        now: DateTime<Utc>,
    ) -> AppResult<(Order, Transition)> {
        self.mutate_order(id, now, |order| order.cancel(reason, actor, now))
    }

    fn mutate_order(
        &self,
        id: &str,
        now: DateTime<Utc>,
        change: impl FnOnce(&mut Order) -> AppResult<Transition>,
    ) -> AppResult<(Order, Transition)> {
        let mut orders = self.orders.write();
        let order = orders
            .rows
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or_else(|| order_not_found(id))?;

        let transition = change(order)?;
        let snapshot = order.clone();
        if transition == Transition::Changed
            && snapshot.status == OrderStatus::Cancelled
            && let Err(err) = self.refund(&snapshot, now)
        {
            tracing::error!(order_id = %snapshot.id, error = %err, "Refund failed");
        }
        if transition == Transition::Changed {
            self.notifications
                .write()
                .push(status_notification(&snapshot, now));
        }
        Ok((snapshot, transition))
    }
}
