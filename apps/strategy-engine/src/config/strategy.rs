//! Strategy tunables.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::application::ports::{BarInterval, HistorySpan};

/// Tunables for the trend/volatility dispatch and strike selection.
///
/// The volatility threshold and strike distance carry the original
/// calibration as defaults only; both are plain configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyConfig {
    /// Underlying to trade.
    pub symbol: String,
    /// Bar interval for price history.
    #[serde(default = "default_interval")]
    pub interval: BarInterval,
    /// History span for price history.
    #[serde(default = "default_span")]
    pub span: HistorySpan,
    /// Short EMA window (bars).
    #[serde(default = "default_short_window")]
    pub short_window: usize,
    /// Long EMA window (bars).
    #[serde(default = "default_long_window")]
    pub long_window: usize,
    /// Implied-volatility threshold separating the dispatch columns.
    #[serde(default = "default_iv_threshold")]
    pub iv_threshold: f64,
    /// Strike distance from spot for spread legs (underlying price units).
    #[serde(default = "default_strike_distance")]
    pub strike_distance: Decimal,
    /// Expiration for single-expiration templates and the near calendar leg.
    pub near_expiration: NaiveDate,
    /// Expiration for the far calendar leg.
    pub far_expiration: NaiveDate,
}

const fn default_interval() -> BarInterval {
    BarInterval::Day
}

const fn default_span() -> HistorySpan {
    HistorySpan::Month
}

const fn default_short_window() -> usize {
    5
}

const fn default_long_window() -> usize {
    20
}

const fn default_iv_threshold() -> f64 {
    0.3
}

fn default_strike_distance() -> Decimal {
    Decimal::new(2, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_optional_fields() {
        let parsed: StrategyConfig = serde_json::from_str(
            r#"{
                "symbol": "AAPL",
                "near_expiration": "2026-09-18",
                "far_expiration": "2026-10-16"
            }"#,
        )
        .unwrap();

        assert_eq!(parsed.interval, BarInterval::Day);
        assert_eq!(parsed.span, HistorySpan::Month);
        assert_eq!(parsed.short_window, 5);
        assert_eq!(parsed.long_window, 20);
        assert!((parsed.iv_threshold - 0.3).abs() < f64::EPSILON);
        assert_eq!(parsed.strike_distance, Decimal::new(2, 0));
    }

    #[test]
    fn expirations_are_required() {
        let parsed = serde_json::from_str::<StrategyConfig>(r#"{"symbol": "AAPL"}"#);
        assert!(parsed.is_err());
    }
}
