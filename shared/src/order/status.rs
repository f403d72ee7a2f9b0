//! Order status lifecycle and transition policy

use crate::error::{AppError, AppResult, ErrorCode};
use crate::models::Role;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Order status
///
/// ```text
/// pending → confirmed → preparing → out_for_delivery → delivered
///    └──────────┴────────────┴──→ cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Preparing,
    #[serde(alias = "on_the_way")]
    OutForDelivery,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 6] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Preparing,
        OrderStatus::OutForDelivery,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }

    /// Statuses a customer may still cancel from
    pub fn is_cancellable(&self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed | Self::Preparing)
    }

    /// Next status on the happy path
    pub fn next(&self) -> Option<OrderStatus> {
        match self {
            Self::Pending => Some(Self::Confirmed),
            Self::Confirmed => Some(Self::Preparing),
            Self::Preparing => Some(Self::OutForDelivery),
            Self::OutForDelivery => Some(Self::Delivered),
            Self::Delivered | Self::Cancelled => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Preparing => "preparing",
            Self::OutForDelivery => "out_for_delivery",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }

    /// Customer-facing notification title for entering this status
    pub fn headline(&self) -> &'static str {
        match self {
            Self::Pending => "Order Placed",
            Self::Confirmed => "Order Confirmed",
            Self::Preparing => "Order Being Prepared",
            Self::OutForDelivery => "Order On The Way",
            Self::Delivered => "Order Delivered!",
            Self::Cancelled => "Order Cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who is changing an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Actor {
    Customer,
    /// Owner of the order's restaurant
    Restaurant,
    Admin,
    System,
}

impl From<Role> for Actor {
    fn from(role: Role) -> Self {
        match role {
            Role::Customer => Actor::Customer,
            Role::Owner => Actor::Restaurant,
            Role::Admin => Actor::Admin,
        }
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Actor::Customer => "customer",
            Actor::Restaurant => "restaurant",
            Actor::Admin => "admin",
            Actor::System => "system",
        })
    }
}

/// Outcome of an allowed status change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Target equals the current status; nothing to do
    Unchanged,
    Changed,
}

/// Decide whether `actor` may move an order from `from` to `to`
///
/// - Terminal statuses are final for every actor.
/// - Re-setting the current status is a no-op.
/// - Customers may only cancel, and only before the order leaves the kitchen.
/// - Restaurant, admin and system actors may set any status from a
///   non-terminal one, including backwards corrections.
pub fn check_transition(from: OrderStatus, to: OrderStatus, actor: Actor) -> AppResult<Transition> {
    match from {
        OrderStatus::Delivered if to != from => {
            return Err(AppError::new(ErrorCode::OrderAlreadyCompleted)
                .with_detail("status", from.as_str()));
        }
        OrderStatus::Cancelled if to != from => {
            return Err(AppError::new(ErrorCode::OrderAlreadyCancelled)
                .with_detail("status", from.as_str()));
        }
        _ => {}
    }

    if to == from {
        return Ok(Transition::Unchanged);
    }

    match actor {
        Actor::Customer => {
            if to != OrderStatus::Cancelled {
                return Err(AppError::permission_denied(
                    "Customers can only cancel their orders",
                ));
            }
            if !from.is_cancellable() {
                return Err(AppError::new(ErrorCode::OrderNotCancellable)
                    .with_detail("status", from.as_str()));
            }
            Ok(Transition::Changed)
        }
        Actor::Restaurant | Actor::Admin | Actor::System => Ok(Transition::Changed),
    }
}
