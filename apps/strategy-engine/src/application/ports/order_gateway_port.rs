//! Order Gateway Port (Driven Port)
//!
//! Interface for submitting option orders to a brokerage.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::shared::{BrokerId, OrderId};
use crate::domain::strategy::OrderRequest;

/// Order lifecycle status as reported by the venue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Received but not yet acknowledged.
    New,
    /// Acknowledged by the venue.
    Accepted,
    /// Partially filled.
    PartiallyFilled,
    /// Fully filled.
    Filled,
    /// Canceled.
    Canceled,
    /// Rejected by the venue.
    Rejected,
    /// Expired unfilled.
    Expired,
}

impl OrderStatus {
    /// Whether the venue has refused this order.
    #[must_use]
    pub const fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected)
    }
}

/// Acknowledgment from the gateway after order submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderAck {
    /// Broker-assigned order ID.
    pub broker_order_id: BrokerId,
    /// Client order ID echoed back.
    pub client_order_id: OrderId,
    /// Current status.
    pub status: OrderStatus,
}

/// Gateway error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum GatewayError {
    /// Connection error.
    #[error("gateway connection error: {message}")]
    ConnectionError {
        /// Error details.
        message: String,
    },

    /// Order rejected by the venue (insufficient funds, invalid contract,
    /// market closed).
    #[error("order rejected: {reason}")]
    OrderRejected {
        /// Rejection reason.
        reason: String,
    },

    /// Order not found.
    #[error("order not found: {order_id}")]
    OrderNotFound {
        /// The missing order ID.
        order_id: String,
    },

    /// Rate limited by the venue.
    #[error("rate limited by gateway")]
    RateLimited,

    /// Unknown error.
    #[error("gateway error: {message}")]
    Unknown {
        /// Error details.
        message: String,
    },
}

/// Port for order submission and management.
#[async_trait]
pub trait OrderGatewayPort: Send + Sync {
    /// Submit an order to the venue.
    async fn submit_order(&self, request: &OrderRequest) -> Result<OrderAck, GatewayError>;

    /// Cancel an open order.
    async fn cancel_order(&self, broker_order_id: &BrokerId) -> Result<(), GatewayError>;

    /// Replace an open order's limit price.
    async fn replace_order(
        &self,
        broker_order_id: &BrokerId,
        new_limit: Decimal,
    ) -> Result<OrderAck, GatewayError>;

    /// Get the current status of an order.
    async fn get_order(&self, broker_order_id: &BrokerId) -> Result<OrderAck, GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_is_the_only_rejection_status() {
        assert!(OrderStatus::Rejected.is_rejected());
        assert!(!OrderStatus::Filled.is_rejected());
        assert!(!OrderStatus::New.is_rejected());
    }
}
