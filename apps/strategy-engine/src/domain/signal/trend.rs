//! Trend classification via EMA crossover.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::ema_series;

/// Errors from signal computation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignalError {
    /// Fewer price bars than the crossover comparison requires.
    #[error("insufficient data: {required} bars required, {actual} available")]
    InsufficientData {
        /// Minimum number of bars: `max(short, long) + 1`.
        required: usize,
        /// Bars actually supplied.
        actual: usize,
    },

    /// An EMA window of zero has no defined smoothing factor.
    #[error("invalid EMA window: {window}")]
    InvalidWindow {
        /// The offending window length.
        window: usize,
    },
}

/// Directional trend signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Trend {
    /// Short EMA crossed above long EMA on the last bar.
    Bullish,
    /// Short EMA crossed below long EMA on the last bar.
    Bearish,
    /// No crossing on the last bar.
    Neutral,
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bullish => write!(f, "bullish"),
            Self::Bearish => write!(f, "bearish"),
            Self::Neutral => write!(f, "neutral"),
        }
    }
}

/// Classify the trend from closing prices.
///
/// Compares the short- and long-window EMAs at the last two bars:
/// bullish when the short EMA crosses above the long EMA, bearish on the
/// symmetric downward crossing, neutral otherwise.
///
/// # Errors
///
/// `InsufficientData` when fewer than `max(short, long) + 1` closes are
/// supplied; `InvalidWindow` when either window is zero.
pub fn classify_trend(
    closes: &[Decimal],
    short_window: usize,
    long_window: usize,
) -> Result<Trend, SignalError> {
    if short_window == 0 {
        return Err(SignalError::InvalidWindow {
            window: short_window,
        });
    }
    if long_window == 0 {
        return Err(SignalError::InvalidWindow {
            window: long_window,
        });
    }

    let required = short_window.max(long_window) + 1;
    if closes.len() < required {
        return Err(SignalError::InsufficientData {
            required,
            actual: closes.len(),
        });
    }

    let short = ema_series(closes, short_window);
    let long = ema_series(closes, long_window);
    let t = closes.len() - 1;

    let crossed_up = short[t] > long[t] && short[t - 1] <= long[t - 1];
    let crossed_down = short[t] < long[t] && short[t - 1] >= long[t - 1];

    Ok(if crossed_up {
        Trend::Bullish
    } else if crossed_down {
        Trend::Bearish
    } else {
        Trend::Neutral
    })
}
