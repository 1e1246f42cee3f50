//! Trend signal computation.
//!
//! Exponential moving averages over closing prices and the crossover
//! classifier that turns them into a trend signal.

mod ema;
mod trend;

pub use ema::ema_series;
pub use trend::{SignalError, Trend, classify_trend};
