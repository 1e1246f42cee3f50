//! Exponential moving average.

use rust_decimal::Decimal;

/// Compute the EMA series for a price sequence.
///
/// Recurrence: `ema[0] = price[0]`, then
/// `ema[t] = α·price[t] + (1−α)·ema[t−1]` with `α = 2/(window+1)`.
///
/// `window` must be at least 1. An empty input yields an empty series.
#[must_use]
pub fn ema_series(prices: &[Decimal], window: usize) -> Vec<Decimal> {
    let Some(first) = prices.first() else {
        return Vec::new();
    };

    let alpha = Decimal::from(2) / Decimal::from(window as u64 + 1);
    let one_minus_alpha = Decimal::ONE - alpha;

    let mut series = Vec::with_capacity(prices.len());
    series.push(*first);
    for price in &prices[1..] {
        let prev = series[series.len() - 1];
        series.push(alpha * *price + one_minus_alpha * prev);
    }
    series
}
