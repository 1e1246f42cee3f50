//! Application Ports
//!
//! Driven (secondary/outbound) ports. The infrastructure layer provides
//! implementations; the core never sees a concrete venue.

mod market_data_port;
mod order_gateway_port;

pub use market_data_port::{BarInterval, HistorySpan, MarketDataError, MarketDataPort};
pub use order_gateway_port::{GatewayError, OrderAck, OrderGatewayPort, OrderStatus};
