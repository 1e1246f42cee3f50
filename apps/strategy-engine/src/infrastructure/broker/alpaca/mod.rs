//! Alpaca Markets adapters.
//!
//! Implements both ports against Alpaca's REST APIs: stock bars and option
//! snapshots for market data, the orders API for execution. A single
//! explicit [`AlpacaConfig`] session object is passed to both adapter
//! constructors; there is no process-wide authentication state.

mod api_types;
mod config;
mod error;
mod gateway;
mod http_client;
mod market_data;

pub use config::{AlpacaConfig, AlpacaEnvironment, RetryConfig};
pub use error::AlpacaError;
pub use gateway::AlpacaOrderGateway;
pub use market_data::AlpacaMarketData;
