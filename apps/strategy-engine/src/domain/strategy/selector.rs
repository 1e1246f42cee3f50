//! Strategy dispatch from trend and volatility.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::market::{
    OptionChain, OptionType, find_contract_by_strike, select_atm_strike,
};
use crate::domain::signal::Trend;

use super::StrategyError;

/// The six strategy templates the engine can dispatch to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StrategyKind {
    /// Buy call at lower strike, sell call at higher strike.
    BullCallSpread,
    /// Buy put at higher strike, sell put at lower strike.
    BearPutSpread,
    /// Sell near-expiration call, buy far-expiration call at the same strike.
    CalendarCallSpread,
    /// Buy call and put at the same ATM strike.
    LongStraddle,
    /// Buy one ATM call.
    LongCall,
    /// Buy one ATM put.
    LongPut,
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BullCallSpread => write!(f, "bull call spread"),
            Self::BearPutSpread => write!(f, "bear put spread"),
            Self::CalendarCallSpread => write!(f, "calendar call spread"),
            Self::LongStraddle => write!(f, "long straddle"),
            Self::LongCall => write!(f, "long call"),
            Self::LongPut => write!(f, "long put"),
        }
    }
}

/// Pick a strategy from the trend signal and the average ATM implied
/// volatility.
///
/// | Trend   | IV > threshold | IV ≤ threshold       |
/// |---------|----------------|----------------------|
/// | bullish | Long Call      | Bull Call Spread     |
/// | bearish | Long Put       | Bear Put Spread      |
/// | neutral | Long Straddle  | Calendar Call Spread |
#[must_use]
pub fn select_strategy(trend: Trend, average_iv: f64, iv_threshold: f64) -> StrategyKind {
    let elevated = average_iv > iv_threshold;
    match (trend, elevated) {
        (Trend::Bullish, true) => StrategyKind::LongCall,
        (Trend::Bullish, false) => StrategyKind::BullCallSpread,
        (Trend::Bearish, true) => StrategyKind::LongPut,
        (Trend::Bearish, false) => StrategyKind::BearPutSpread,
        (Trend::Neutral, true) => StrategyKind::LongStraddle,
        (Trend::Neutral, false) => StrategyKind::CalendarCallSpread,
    }
}

/// Mean implied volatility of the ATM call and ATM put at one expiration.
///
/// # Errors
///
/// `EmptyChain` when either side of the chain has no contracts at the
/// expiration; `NoMatchingContract` when the ATM strike resolves to no
/// contract.
pub fn average_atm_iv(
    chain: &OptionChain,
    spot: Decimal,
    expiration: NaiveDate,
) -> Result<f64, StrategyError> {
    let call_iv = atm_iv(chain, OptionType::Call, spot, expiration)?;
    let put_iv = atm_iv(chain, OptionType::Put, spot, expiration)?;
    Ok((call_iv + put_iv) / 2.0)
}

fn atm_iv(
    chain: &OptionChain,
    option_type: OptionType,
    spot: Decimal,
    expiration: NaiveDate,
) -> Result<f64, StrategyError> {
    let contracts = chain.filter(option_type, Some(expiration));
    let strike =
        select_atm_strike(&contracts, spot).ok_or(StrategyError::EmptyChain {
            option_type,
            expiration,
        })?;
    let contract = find_contract_by_strike(&contracts, strike).ok_or(
        StrategyError::NoMatchingContract {
            option_type,
            strike,
            expiration,
        },
    )?;
    Ok(contract.implied_volatility)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::market::OptionContract;
    use crate::domain::shared::Symbol;
    use rust_decimal_macros::dec;
    use test_case::test_case;

    #[test_case(Trend::Bullish, 0.5, StrategyKind::LongCall; "bullish high iv")]
    #[test_case(Trend::Bullish, 0.2, StrategyKind::BullCallSpread; "bullish low iv")]
    #[test_case(Trend::Bearish, 0.5, StrategyKind::LongPut; "bearish high iv")]
    #[test_case(Trend::Bearish, 0.2, StrategyKind::BearPutSpread; "bearish low iv")]
    #[test_case(Trend::Neutral, 0.5, StrategyKind::LongStraddle; "neutral high iv")]
    #[test_case(Trend::Neutral, 0.2, StrategyKind::CalendarCallSpread; "neutral low iv")]
    fn dispatch_table(trend: Trend, iv: f64, expected: StrategyKind) {
        assert_eq!(select_strategy(trend, iv, 0.3), expected);
    }

    #[test]
    fn threshold_is_exclusive() {
        // IV exactly at the threshold counts as low volatility.
        assert_eq!(
            select_strategy(Trend::Bullish, 0.3, 0.3),
            StrategyKind::BullCallSpread
        );
    }

    #[test]
    fn average_atm_iv_means_call_and_put() {
        let chain = OptionChain::new(
            Symbol::new("AAPL"),
            vec![
                OptionContract::from_occ("AAPL241220C00100000", 0.20).unwrap(),
                OptionContract::from_occ("AAPL241220P00100000", 0.40).unwrap(),
                // Farther from the money; must not contribute.
                OptionContract::from_occ("AAPL241220C00120000", 0.90).unwrap(),
            ],
        );
        let expiration = chrono::NaiveDate::from_ymd_opt(2024, 12, 20).unwrap();
        let iv = average_atm_iv(&chain, dec!(101), expiration).unwrap();
        assert!((iv - 0.30).abs() < 1e-12);
    }

    #[test]
    fn average_atm_iv_requires_both_sides() {
        let chain = OptionChain::new(
            Symbol::new("AAPL"),
            vec![OptionContract::from_occ("AAPL241220C00100000", 0.20).unwrap()],
        );
        let expiration = chrono::NaiveDate::from_ymd_opt(2024, 12, 20).unwrap();
        let err = average_atm_iv(&chain, dec!(100), expiration).unwrap_err();
        assert!(matches!(
            err,
            StrategyError::EmptyChain {
                option_type: OptionType::Put,
                ..
            }
        ));
    }
}
