//! Strategy construction errors.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::domain::market::OptionType;

/// Errors raised while resolving a strategy template into order legs.
///
/// Strike-selection fallbacks are defined degenerate behavior and never
/// raise; these errors cover the conditions a template cannot recover from.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StrategyError {
    /// The chain holds no contract of the required type at the expiration.
    #[error("option chain has no {option_type} contracts expiring {expiration}")]
    EmptyChain {
        /// Required contract type.
        option_type: OptionType,
        /// Required expiration.
        expiration: NaiveDate,
    },

    /// Strike selection succeeded but no contract carries that strike.
    #[error("no {option_type} contract at strike {strike} expiring {expiration}")]
    NoMatchingContract {
        /// Required contract type.
        option_type: OptionType,
        /// The selected strike.
        strike: Decimal,
        /// Required expiration.
        expiration: NaiveDate,
    },

    /// Calendar spreads require the far expiration after the near one.
    #[error("far expiration {far} is not after near expiration {near}")]
    ExpirationOrder {
        /// Near-leg expiration.
        near: NaiveDate,
        /// Far-leg expiration.
        far: NaiveDate,
    },
}
