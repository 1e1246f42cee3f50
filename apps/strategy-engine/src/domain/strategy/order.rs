//! Order request types consumed by the gateway port.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::shared::{ContractId, OrderId};

/// Order side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderSide {
    /// Buy to open.
    Buy,
    /// Sell to open.
    Sell,
}

impl std::fmt::Display for OrderSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buy => write!(f, "buy"),
            Self::Sell => write!(f, "sell"),
        }
    }
}

/// Order kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderKind {
    /// Execute at the venue's current price.
    Market,
    /// Execute at `limit_price` or better.
    Limit,
}

/// Request for one order leg.
///
/// Constructed by a strategy template, consumed by the gateway. The client
/// order id is generated per leg so the venue can deduplicate a retried
/// submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    /// Contract to trade.
    pub contract_id: ContractId,
    /// Buy or sell.
    pub side: OrderSide,
    /// Number of contracts.
    pub quantity: u32,
    /// Market or limit.
    pub kind: OrderKind,
    /// Limit price (for limit orders).
    pub limit_price: Option<Decimal>,
    /// Client-generated order id.
    pub client_order_id: OrderId,
}

impl OrderRequest {
    /// Create a market order request.
    #[must_use]
    pub fn market(contract_id: ContractId, side: OrderSide, quantity: u32) -> Self {
        Self {
            contract_id,
            side,
            quantity,
            kind: OrderKind::Market,
            limit_price: None,
            client_order_id: OrderId::generate(),
        }
    }

    /// Create a limit order request.
    #[must_use]
    pub fn limit(
        contract_id: ContractId,
        side: OrderSide,
        quantity: u32,
        limit_price: Decimal,
    ) -> Self {
        Self {
            contract_id,
            side,
            quantity,
            kind: OrderKind::Limit,
            limit_price: Some(limit_price),
            client_order_id: OrderId::generate(),
        }
    }
}
