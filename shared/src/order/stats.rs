//! Order aggregates for the admin and owner dashboards

use super::status::OrderStatus;
use super::types::Order;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Order counts per status plus delivered revenue
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderStats {
    pub total: usize,
    pub pending: usize,
    pub confirmed: usize,
    pub preparing: usize,
    pub out_for_delivery: usize,
    pub delivered: usize,
    pub cancelled: usize,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_revenue: Decimal,
}

impl OrderStats {
    pub fn from_orders<'a>(orders: impl IntoIterator<Item = &'a Order>) -> Self {
        let mut stats = Self::default();
        for order in orders {
            stats.total += 1;
            match order.status {
                OrderStatus::Pending => stats.pending += 1,
                OrderStatus::Confirmed => stats.confirmed += 1,
                OrderStatus::Preparing => stats.preparing += 1,
                OrderStatus::OutForDelivery => stats.out_for_delivery += 1,
                OrderStatus::Delivered => {
                    stats.delivered += 1;
                    stats.total_revenue += order.total_amount;
                }
                OrderStatus::Cancelled => stats.cancelled += 1,
            }
        }
        stats
    }
}

/// Restaurant owner dashboard numbers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnerStats {
    pub restaurant_id: String,
    pub total_orders: usize,
    /// Orders waiting on the restaurant (pending or confirmed)
    pub pending_orders: usize,
    pub total_menu_items: usize,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_revenue: Decimal,
}

impl OwnerStats {
    pub fn from_orders<'a>(
        restaurant_id: impl Into<String>,
        orders: impl IntoIterator<Item = &'a Order>,
        total_menu_items: usize,
    ) -> Self {
        let stats = OrderStats::from_orders(orders);
        Self {
            restaurant_id: restaurant_id.into(),
            total_orders: stats.total,
            pending_orders: stats.pending + stats.confirmed,
            total_menu_items,
            total_revenue: stats.total_revenue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::{Actor, CheckoutLine, CheckoutRequest, FeeSchedule, PaymentChoice};
    use chrono::Utc;

    fn order(id: &str, restaurant: &str, status: OrderStatus) -> Order {
        let req = CheckoutRequest {
            request_id: None,
            user_id: "user_001".to_string(),
            restaurant_id: restaurant.to_string(),
            restaurant_name: None,
            items: vec![CheckoutLine {
                menu_item_id: "1".to_string(),
                name: "Dosa".to_string(),
                price: Decimal::from(10),
                quantity: 1,
                image: None,
                is_veg: true,
            }],
            delivery_address: "addr".to_string(),
            delivery_instructions: None,
            payment_method: PaymentChoice::Cash,
            coupon_code: None,
        };
        let mut order =
            Order::place(id, &req, &FeeSchedule::default(), Decimal::ZERO, Utc::now()).unwrap();
        if status != OrderStatus::Pending {
            order.update_status(status, Actor::Admin, Utc::now()).unwrap();
        }
        order
    }

    #[test]
    fn test_counts_and_delivered_revenue() {
        let orders = vec![
            order("a", "r1", OrderStatus::Pending),
            order("b", "r1", OrderStatus::Delivered),
            order("c", "r2", OrderStatus::Delivered),
            order("d", "r1", OrderStatus::Cancelled),
            order("e", "r1", OrderStatus::Confirmed),
        ];
        let stats = OrderStats::from_orders(&orders);
        assert_eq!(stats.total, 5);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.delivered, 2);
        assert_eq!(stats.cancelled, 1);
        // 10 + 49 + 0.50 per delivered order
        assert_eq!(stats.total_revenue, Decimal::new(11900, 2));

        let owner = OwnerStats::from_orders(
            "r1",
            orders.iter().filter(|o| o.restaurant_id == "r1"),
            12,
        );
        assert_eq!(owner.total_orders, 4);
        assert_eq!(owner.pending_orders, 2);
        assert_eq!(owner.total_menu_items, 12);
        assert_eq!(owner.total_revenue, Decimal::new(5950, 2));
    }
}
