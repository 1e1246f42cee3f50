//! Alpaca API request and response types.
//!
//! These types map directly to Alpaca's REST API format.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::application::ports::{OrderAck, OrderStatus};
use crate::domain::shared::{BrokerId, OrderId};
use crate::domain::strategy::{OrderKind, OrderRequest};

// ============================================================================
// Order Request Types
// ============================================================================

/// Order request for the Alpaca orders API.
#[derive(Debug, Clone, Serialize)]
pub struct AlpacaOrderRequest {
    /// Contract symbol (OCC format for option legs).
    pub symbol: String,
    /// Quantity (contracts).
    pub qty: String,
    /// Order side.
    pub side: String,
    /// Order type.
    #[serde(rename = "type")]
    pub order_type: String,
    /// Time in force.
    pub time_in_force: String,
    /// Limit price (for limit orders).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit_price: Option<String>,
    /// Client order ID.
    pub client_order_id: String,
}

impl AlpacaOrderRequest {
    /// Build the wire request from a domain order request.
    #[must_use]
    pub fn from_domain(request: &OrderRequest) -> Self {
        let order_type = match request.kind {
            OrderKind::Market => "market",
            OrderKind::Limit => "limit",
        };

        Self {
            symbol: request.contract_id.as_str().to_string(),
            qty: request.quantity.to_string(),
            side: request.side.to_string(),
            order_type: order_type.to_string(),
            time_in_force: "day".to_string(),
            limit_price: request.limit_price.map(|p| p.to_string()),
            client_order_id: request.client_order_id.as_str().to_string(),
        }
    }
}

/// Body for a PATCH order replacement.
#[derive(Debug, Clone, Serialize)]
pub struct AlpacaReplaceRequest {
    /// New limit price.
    pub limit_price: String,
}

// ============================================================================
// Order Response Types
// ============================================================================

/// Order response from the Alpaca orders API.
#[derive(Debug, Clone, Deserialize)]
pub struct AlpacaOrderResponse {
    /// Broker order ID.
    pub id: String,
    /// Client order ID.
    pub client_order_id: String,
    /// Contract symbol.
    pub symbol: String,
    /// Order status.
    pub status: String,
}

impl AlpacaOrderResponse {
    /// Convert to `OrderAck`.
    #[must_use]
    pub fn to_order_ack(&self) -> OrderAck {
        OrderAck {
            broker_order_id: BrokerId::new(&self.id),
            client_order_id: OrderId::new(&self.client_order_id),
            status: parse_order_status(&self.status),
        }
    }
}

// ============================================================================
// Market Data Types
// ============================================================================

/// One bar from the stock bars API.
#[derive(Debug, Clone, Deserialize)]
pub struct AlpacaBar {
    /// Bar start time (RFC 3339).
    pub t: String,
    /// Open.
    pub o: Decimal,
    /// High.
    pub h: Decimal,
    /// Low.
    pub l: Decimal,
    /// Close.
    pub c: Decimal,
    /// Volume.
    pub v: u64,
}

/// Response from the stock bars API.
#[derive(Debug, Clone, Deserialize)]
pub struct AlpacaBarsResponse {
    /// Bars, oldest first. Absent when the window holds no data.
    #[serde(default)]
    pub bars: Option<Vec<AlpacaBar>>,
    /// Pagination token.
    #[serde(default)]
    pub next_page_token: Option<String>,
}

/// Response from the latest trade API.
#[derive(Debug, Clone, Deserialize)]
pub struct AlpacaLatestTradeResponse {
    /// The latest trade.
    pub trade: AlpacaTrade,
}

/// Latest trade payload.
#[derive(Debug, Clone, Deserialize)]
pub struct AlpacaTrade {
    /// Trade price.
    pub p: Decimal,
}

/// One option snapshot from the option chain API.
#[derive(Debug, Clone, Deserialize)]
pub struct AlpacaOptionSnapshot {
    /// Implied volatility; absent for thinly traded contracts.
    #[serde(rename = "impliedVolatility", default)]
    pub implied_volatility: Option<f64>,
}

/// Response from the option chain snapshots API.
#[derive(Debug, Clone, Deserialize)]
pub struct AlpacaOptionSnapshotsResponse {
    /// Snapshots keyed by OCC contract symbol.
    #[serde(default)]
    pub snapshots: HashMap<String, AlpacaOptionSnapshot>,
    /// Pagination token.
    #[serde(default)]
    pub next_page_token: Option<String>,
}

// ============================================================================
// Error Types
// ============================================================================

/// Error response from the Alpaca API.
///
/// The `code` field is numeric on some endpoints and a string on others.
#[derive(Debug, Clone, Deserialize)]
pub struct AlpacaErrorResponse {
    /// Error code.
    #[serde(default)]
    pub code: Option<serde_json::Value>,
    /// Error message.
    pub message: String,
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Parse Alpaca order status string to the port `OrderStatus`.
pub fn parse_order_status(status: &str) -> OrderStatus {
    match status.to_lowercase().as_str() {
        "accepted" | "accepted_for_bidding" | "replaced" | "pending_replace" => {
            OrderStatus::Accepted
        }
        "partially_filled" => OrderStatus::PartiallyFilled,
        "filled" => OrderStatus::Filled,
        "done_for_day" | "expired" => OrderStatus::Expired,
        "canceled" | "pending_cancel" => OrderStatus::Canceled,
        "rejected" => OrderStatus::Rejected,
        // new, pending_new, stopped, suspended, calculated, and unknown -> New
        _ => OrderStatus::New,
    }
}
