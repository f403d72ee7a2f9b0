//! Order domain: checkout payload, pricing, lifecycle and aggregates

pub mod checkout;
pub mod pricing;
pub mod stats;
pub mod status;
pub mod types;

pub use checkout::{CheckoutLine, CheckoutRequest, PaymentChoice};
pub use pricing::{FeeSchedule, OrderTotals, round_money};
pub use stats::{OrderStats, OwnerStats};
pub use status::{Actor, OrderStatus, Transition, check_transition};
pub use types::{Cancellation, Order, OrderLine, PaymentStatus, order_number};

use serde::{Deserialize, Serialize};

/// Body of `PUT /orders/{id}/status`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: OrderStatus,
}

/// Body of `POST /orders/{id}/cancel`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelRequest {
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub cancelled_by: Option<Actor>,
}
