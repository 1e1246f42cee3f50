//! Alpaca-specific error types.

use thiserror::Error;

use crate::application::ports::{GatewayError, MarketDataError};

/// Errors from the Alpaca adapters.
#[derive(Debug, Error, Clone)]
pub enum AlpacaError {
    /// API returned an error.
    #[error("API error: {code} - {message}")]
    Api {
        /// Error code from the API.
        code: String,
        /// Error message from the API.
        message: String,
    },

    /// Order was rejected.
    #[error("order rejected: {0}")]
    OrderRejected(String),

    /// Authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Rate limited.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Suggested retry delay in seconds.
        retry_after_secs: u64,
    },

    /// Network error (retryable).
    #[error("network error: {0}")]
    Network(String),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    JsonParse(String),

    /// Max retries exceeded.
    #[error("max retries exceeded after {attempts} attempts")]
    MaxRetriesExceeded {
        /// Number of attempts made before giving up.
        attempts: u32,
    },

    /// Order not found.
    #[error("order not found: {order_id}")]
    OrderNotFound {
        /// The order ID that was not found.
        order_id: String,
    },
}

impl From<AlpacaError> for GatewayError {
    fn from(err: AlpacaError) -> Self {
        match err {
            AlpacaError::Network(msg) | AlpacaError::JsonParse(msg) => {
                Self::ConnectionError { message: msg }
            }
            AlpacaError::Api { code, message } => Self::Unknown {
                message: format!("{code}: {message}"),
            },
            AlpacaError::OrderRejected(reason) => Self::OrderRejected { reason },
            AlpacaError::AuthenticationFailed => Self::Unknown {
                message: "authentication failed".to_string(),
            },
            AlpacaError::RateLimited { .. } => Self::RateLimited,
            AlpacaError::MaxRetriesExceeded { attempts } => Self::ConnectionError {
                message: format!("max retries exceeded after {attempts} attempts"),
            },
            AlpacaError::OrderNotFound { order_id } => Self::OrderNotFound { order_id },
        }
    }
}

impl From<AlpacaError> for MarketDataError {
    fn from(err: AlpacaError) -> Self {
        match err {
            AlpacaError::Network(message) | AlpacaError::JsonParse(message) => {
                Self::ConnectionError { message }
            }
            AlpacaError::AuthenticationFailed => Self::AuthenticationFailed,
            AlpacaError::RateLimited { retry_after_secs } => Self::RateLimited { retry_after_secs },
            AlpacaError::OrderNotFound { order_id } => Self::DataUnavailable {
                message: format!("not found: {order_id}"),
            },
            AlpacaError::MaxRetriesExceeded { attempts } => Self::ConnectionError {
                message: format!("max retries exceeded after {attempts} attempts"),
            },
            AlpacaError::Api { code, message } => Self::ApiError {
                message: format!("{code}: {message}"),
            },
            AlpacaError::OrderRejected(message) => Self::ApiError { message },
        }
    }
}
