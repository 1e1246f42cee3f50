//! Market Data Port (Driven Port)
//!
//! Interface for fetching market data from external providers.

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::market::{OptionChain, PriceBar};
use crate::domain::shared::Symbol;

/// Bar interval for price history requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BarInterval {
    /// Five-minute bars.
    FiveMinute,
    /// Hourly bars.
    Hour,
    /// Daily bars.
    Day,
}

impl std::fmt::Display for BarInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FiveMinute => write!(f, "5minute"),
            Self::Hour => write!(f, "hour"),
            Self::Day => write!(f, "day"),
        }
    }
}

/// How far back a price history request reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistorySpan {
    /// One week of history.
    Week,
    /// One month of history.
    Month,
    /// One year of history.
    Year,
}

impl std::fmt::Display for HistorySpan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Week => write!(f, "week"),
            Self::Month => write!(f, "month"),
            Self::Year => write!(f, "year"),
        }
    }
}

/// Market data error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum MarketDataError {
    /// Connection error.
    #[error("market data connection error: {message}")]
    ConnectionError {
        /// Error details.
        message: String,
    },

    /// Authentication failed.
    #[error("market data authentication failed")]
    AuthenticationFailed,

    /// Symbol not found.
    #[error("symbol not found: {symbol}")]
    SymbolNotFound {
        /// The unknown symbol.
        symbol: String,
    },

    /// Data unavailable.
    #[error("market data unavailable: {message}")]
    DataUnavailable {
        /// Error details.
        message: String,
    },

    /// Rate limited.
    #[error("rate limited, retry after {retry_after_secs} seconds")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// API error.
    #[error("market data API error: {message}")]
    ApiError {
        /// Error details.
        message: String,
    },
}

/// Port for fetching market data from external providers.
#[async_trait]
pub trait MarketDataPort: Send + Sync {
    /// Get historical price bars, ordered oldest-first.
    async fn get_price_history(
        &self,
        symbol: &Symbol,
        interval: BarInterval,
        span: HistorySpan,
    ) -> Result<Vec<PriceBar>, MarketDataError>;

    /// Get the option chain for an underlying.
    ///
    /// With `expiration` set, only contracts expiring on that date are
    /// returned; otherwise the full chain.
    async fn get_option_chain(
        &self,
        symbol: &Symbol,
        expiration: Option<NaiveDate>,
    ) -> Result<OptionChain, MarketDataError>;

    /// Get the latest spot price of the underlying.
    async fn get_spot_price(&self, symbol: &Symbol) -> Result<Decimal, MarketDataError>;
}
