//! Historical price bar.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::shared::Timestamp;

/// A single OHLCV price bar.
///
/// Immutable once retrieved from the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBar {
    /// Bar start time.
    pub timestamp: Timestamp,
    /// Opening price.
    pub open: Decimal,
    /// High price.
    pub high: Decimal,
    /// Low price.
    pub low: Decimal,
    /// Closing price.
    pub close: Decimal,
    /// Traded volume.
    pub volume: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn price_bar_round_trips_through_serde() {
        let bar = PriceBar {
            timestamp: Timestamp::parse("2026-01-15T14:30:00Z").unwrap(),
            open: dec!(100.5),
            high: dec!(101.0),
            low: dec!(99.75),
            close: dec!(100.25),
            volume: 1_250_000,
        };

        let json = serde_json::to_string(&bar).unwrap();
        let back: PriceBar = serde_json::from_str(&json).unwrap();
        assert_eq!(bar, back);
    }
}
