//! Strategy Engine Binary
//!
//! Runs one strategy evaluation and execution pass, then exits.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin strategy-engine
//! ```
//!
//! # Configuration
//!
//! Loaded from `config.yaml` (optional) with environment override
//! (prefix `ENGINE`, `__` separator).
//!
//! ## Required
//! - `ENGINE__BROKER__API_KEY`: Broker API key
//! - `ENGINE__BROKER__API_SECRET`: Broker API secret
//! - `ENGINE__STRATEGY__SYMBOL`: Underlying to trade
//! - `ENGINE__STRATEGY__NEAR_EXPIRATION`: Near expiration (YYYY-MM-DD)
//! - `ENGINE__STRATEGY__FAR_EXPIRATION`: Far expiration (YYYY-MM-DD)
//!
//! ## Optional
//! - `ENGINE__BROKER__ENVIRONMENT`: PAPER | LIVE (default: PAPER)
//! - `ENGINE__STRATEGY__SHORT_WINDOW` / `ENGINE__STRATEGY__LONG_WINDOW`
//! - `ENGINE__STRATEGY__IV_THRESHOLD` (default: 0.3)
//! - `ENGINE__STRATEGY__STRIKE_DISTANCE` (default: 2)
//! - `RUST_LOG`: Log level (default: info)

use std::sync::Arc;

use anyhow::Context;

use strategy_engine::application::use_cases::RunStrategyUseCase;
use strategy_engine::config::load_config;
use strategy_engine::infrastructure::broker::alpaca::{AlpacaMarketData, AlpacaOrderGateway};
use strategy_engine::telemetry::init_telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_telemetry();

    let config = load_config(None).context("failed to load configuration")?;
    let params = config.to_params()?;

    let session = config.broker.to_alpaca();
    tracing::info!(
        symbol = %params.symbol,
        environment = %session.environment,
        short_window = params.short_window,
        long_window = params.long_window,
        iv_threshold = params.iv_threshold,
        "Starting strategy engine"
    );

    let market_data =
        Arc::new(AlpacaMarketData::new(&session).context("failed to build market data adapter")?);
    let gateway =
        Arc::new(AlpacaOrderGateway::new(&session).context("failed to build order gateway")?);

    let use_case = RunStrategyUseCase::new(market_data, gateway, params);
    let report = use_case.execute().await.context("strategy run failed")?;

    tracing::info!(
        symbol = %report.symbol,
        trend = %report.trend,
        average_iv = report.average_iv,
        strategy = %report.kind,
        legs = report.acks.len(),
        "Strategy run complete"
    );
    for ack in &report.acks {
        tracing::info!(
            broker_order_id = %ack.broker_order_id,
            status = ?ack.status,
            "Leg order"
        );
    }

    Ok(())
}
