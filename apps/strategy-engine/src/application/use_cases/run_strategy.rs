//! Run Strategy Use Case
//!
//! One synchronous invocation: fetch history, classify trend, fetch chain
//! and spot, compute ATM volatility, dispatch a template, submit its legs
//! sequentially.
//!
//! Legs are submitted strictly in template order. When a submission fails
//! (or the venue acknowledges with a rejected status), no further leg is
//! submitted; the acks of the legs already placed are preserved in the
//! error so the caller can see exactly what reached the venue.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::ports::{
    BarInterval, GatewayError, HistorySpan, MarketDataError, MarketDataPort, OrderAck,
    OrderGatewayPort,
};
use crate::domain::shared::Symbol;
use crate::domain::signal::{SignalError, Trend, classify_trend};
use crate::domain::strategy::{
    Expirations, StrategyError, StrategyKind, average_atm_iv, build_plan, select_strategy,
};

/// Tunables for one strategy invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunStrategyParams {
    /// Underlying to trade.
    pub symbol: Symbol,
    /// Bar interval for price history.
    pub interval: BarInterval,
    /// History span for price history.
    pub span: HistorySpan,
    /// Short EMA window (bars).
    pub short_window: usize,
    /// Long EMA window (bars).
    pub long_window: usize,
    /// Implied-volatility threshold separating the dispatch columns.
    pub iv_threshold: f64,
    /// Strike distance from spot for spread legs (underlying price units).
    pub strike_distance: Decimal,
    /// Near/far expirations for template resolution.
    pub expirations: Expirations,
}

/// Outcome of one invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyReport {
    /// Underlying traded.
    pub symbol: Symbol,
    /// Classified trend.
    pub trend: Trend,
    /// Average ATM implied volatility used for dispatch.
    pub average_iv: f64,
    /// Spot price at evaluation time.
    pub spot: Decimal,
    /// The dispatched strategy.
    pub kind: StrategyKind,
    /// Acknowledgments for every submitted leg, in submission order.
    pub acks: Vec<OrderAck>,
}

/// Errors from one invocation.
#[derive(Debug, Error)]
pub enum RunStrategyError {
    /// Trend classification failed (insufficient data, bad window).
    #[error(transparent)]
    Signal(#[from] SignalError),

    /// Template resolution failed (empty chain, missing contract).
    #[error(transparent)]
    Strategy(#[from] StrategyError),

    /// Market data could not be fetched.
    #[error(transparent)]
    MarketData(#[from] MarketDataError),

    /// A leg submission failed; later legs were not submitted.
    #[error("leg {failed_leg} submission failed: {source}")]
    Gateway {
        /// Index of the failed leg within the plan.
        failed_leg: usize,
        /// The gateway failure.
        source: GatewayError,
        /// Acks of legs submitted before the failure.
        submitted: Vec<OrderAck>,
    },
}

/// Use case for one strategy evaluation and execution pass.
pub struct RunStrategyUseCase<M, G>
where
    M: MarketDataPort,
    G: OrderGatewayPort,
{
    market_data: Arc<M>,
    gateway: Arc<G>,
    params: RunStrategyParams,
}

impl<M, G> RunStrategyUseCase<M, G>
where
    M: MarketDataPort,
    G: OrderGatewayPort,
{
    /// Create a new use case over the two collaborators.
    pub const fn new(market_data: Arc<M>, gateway: Arc<G>, params: RunStrategyParams) -> Self {
        Self {
            market_data,
            gateway,
            params,
        }
    }

    /// Execute one invocation.
    ///
    /// # Errors
    ///
    /// See [`RunStrategyError`]; no retries and no rollback are performed
    /// here.
    pub async fn execute(&self) -> Result<StrategyReport, RunStrategyError> {
        let params = &self.params;

        let bars = self
            .market_data
            .get_price_history(&params.symbol, params.interval, params.span)
            .await?;
        tracing::debug!(symbol = %params.symbol, bars = bars.len(), "Fetched price history");

        let closes: Vec<Decimal> = bars.iter().map(|bar| bar.close).collect();
        let trend = classify_trend(&closes, params.short_window, params.long_window)?;

        let chain = self
            .market_data
            .get_option_chain(&params.symbol, None)
            .await?;
        let spot = self.market_data.get_spot_price(&params.symbol).await?;
        tracing::debug!(
            symbol = %params.symbol,
            contracts = chain.len(),
            spot = %spot,
            "Fetched option chain and spot"
        );

        let average_iv = average_atm_iv(&chain, spot, params.expirations.near)?;
        let kind = select_strategy(trend, average_iv, params.iv_threshold);

        tracing::info!(
            symbol = %params.symbol,
            trend = %trend,
            average_iv,
            strategy = %kind,
            "Dispatching strategy"
        );

        let plan = build_plan(kind, &chain, spot, params.strike_distance, params.expirations)?;

        let mut acks = Vec::with_capacity(plan.legs.len());
        for (index, leg) in plan.legs.iter().enumerate() {
            tracing::info!(
                leg = index,
                contract = %leg.contract_id,
                side = %leg.side,
                quantity = leg.quantity,
                "Submitting leg"
            );

            let ack = match self.gateway.submit_order(leg).await {
                Ok(ack) => ack,
                Err(source) => {
                    tracing::error!(leg = index, error = %source, "Leg submission failed");
                    return Err(RunStrategyError::Gateway {
                        failed_leg: index,
                        source,
                        submitted: acks,
                    });
                }
            };

            if ack.status.is_rejected() {
                tracing::error!(
                    leg = index,
                    broker_order_id = %ack.broker_order_id,
                    "Venue rejected leg"
                );
                return Err(RunStrategyError::Gateway {
                    failed_leg: index,
                    source: GatewayError::OrderRejected {
                        reason: format!("venue rejected order {}", ack.broker_order_id),
                    },
                    submitted: acks,
                });
            }

            tracing::info!(
                leg = index,
                broker_order_id = %ack.broker_order_id,
                status = ?ack.status,
                "Leg acknowledged"
            );
            acks.push(ack);
        }

        Ok(StrategyReport {
            symbol: params.symbol.clone(),
            trend,
            average_iv,
            spot,
            kind,
            acks,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::market::{OptionChain, OptionContract};
    use crate::infrastructure::mock::{MockMarketData, MockOrderGateway};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn chain() -> OptionChain {
        OptionChain::new(
            Symbol::new("AAPL"),
            vec![
                OptionContract::from_occ("AAPL241220C00095000", 0.2).unwrap(),
                OptionContract::from_occ("AAPL241220C00100000", 0.2).unwrap(),
                OptionContract::from_occ("AAPL241220C00105000", 0.2).unwrap(),
                OptionContract::from_occ("AAPL241220P00095000", 0.2).unwrap(),
                OptionContract::from_occ("AAPL241220P00100000", 0.2).unwrap(),
                OptionContract::from_occ("AAPL241220P00105000", 0.2).unwrap(),
                OptionContract::from_occ("AAPL250117C00100000", 0.2).unwrap(),
            ],
        )
    }

    fn params() -> RunStrategyParams {
        RunStrategyParams {
            symbol: Symbol::new("AAPL"),
            interval: BarInterval::Day,
            span: HistorySpan::Month,
            short_window: 2,
            long_window: 5,
            iv_threshold: 0.3,
            strike_distance: dec!(2),
            expirations: Expirations::new(
                NaiveDate::from_ymd_opt(2024, 12, 20).unwrap(),
                NaiveDate::from_ymd_opt(2025, 1, 17).unwrap(),
            )
            .unwrap(),
        }
    }

    fn bullish_closes() -> Vec<Decimal> {
        vec![
            dec!(100),
            dec!(100),
            dec!(100),
            dec!(100),
            dec!(99),
            dec!(98),
            dec!(110),
        ]
    }

    fn market_data() -> Arc<MockMarketData> {
        let market_data = MockMarketData::new();
        market_data.set_closes(&bullish_closes());
        market_data.set_chain(chain());
        market_data.set_spot(dec!(100));
        Arc::new(market_data)
    }

    #[tokio::test]
    async fn bullish_low_iv_submits_bull_call_spread() {
        let gateway = Arc::new(MockOrderGateway::new());
        let use_case = RunStrategyUseCase::new(market_data(), gateway.clone(), params());

        let report = use_case.execute().await.unwrap();
        assert_eq!(report.kind, StrategyKind::BullCallSpread);
        assert_eq!(report.trend, Trend::Bullish);
        assert_eq!(report.acks.len(), 2);
        assert_eq!(gateway.submissions().len(), 2);
    }

    #[tokio::test]
    async fn failed_buy_leg_stops_sell_leg() {
        let gateway = Arc::new(MockOrderGateway::new());
        gateway.set_fail_at(0);
        let use_case = RunStrategyUseCase::new(market_data(), gateway.clone(), params());

        let err = use_case.execute().await.unwrap_err();
        match err {
            RunStrategyError::Gateway {
                failed_leg,
                submitted,
                ..
            } => {
                assert_eq!(failed_leg, 0);
                assert!(submitted.is_empty());
            }
            other => panic!("unexpected error: {other}"),
        }
        // The sell leg must never reach the gateway.
        assert!(gateway.submissions().is_empty());
    }

    #[tokio::test]
    async fn failed_second_leg_preserves_first_ack() {
        let gateway = Arc::new(MockOrderGateway::new());
        gateway.set_fail_at(1);
        let use_case = RunStrategyUseCase::new(market_data(), gateway.clone(), params());

        let err = use_case.execute().await.unwrap_err();
        match err {
            RunStrategyError::Gateway {
                failed_leg,
                submitted,
                ..
            } => {
                assert_eq!(failed_leg, 1);
                assert_eq!(submitted.len(), 1);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(gateway.submissions().len(), 1);
    }

    mockall::mock! {
        ScriptedMarketData {}

        #[async_trait::async_trait]
        impl MarketDataPort for ScriptedMarketData {
            async fn get_price_history(
                &self,
                symbol: &Symbol,
                interval: BarInterval,
                span: HistorySpan,
            ) -> Result<Vec<crate::domain::market::PriceBar>, MarketDataError>;

            async fn get_option_chain(
                &self,
                symbol: &Symbol,
                expiration: Option<NaiveDate>,
            ) -> Result<OptionChain, MarketDataError>;

            async fn get_spot_price(&self, symbol: &Symbol) -> Result<Decimal, MarketDataError>;
        }
    }

    #[tokio::test]
    async fn market_data_failure_propagates_before_any_submission() {
        let mut market_data = MockScriptedMarketData::default();
        market_data.expect_get_price_history().returning(|_, _, _| {
            Err(MarketDataError::ConnectionError {
                message: "socket closed".to_string(),
            })
        });

        let gateway = Arc::new(MockOrderGateway::new());
        let use_case = RunStrategyUseCase::new(Arc::new(market_data), gateway.clone(), params());

        let err = use_case.execute().await.unwrap_err();
        assert!(matches!(
            err,
            RunStrategyError::MarketData(MarketDataError::ConnectionError { .. })
        ));
        assert!(gateway.submissions().is_empty());
    }

    #[tokio::test]
    async fn too_few_bars_is_insufficient_data() {
        let market_data = MockMarketData::new();
        market_data.set_closes(&[dec!(100), dec!(101)]);
        market_data.set_chain(chain());
        let gateway = Arc::new(MockOrderGateway::new());
        let use_case = RunStrategyUseCase::new(Arc::new(market_data), gateway.clone(), params());

        let err = use_case.execute().await.unwrap_err();
        assert!(matches!(
            err,
            RunStrategyError::Signal(SignalError::InsufficientData { required: 6, actual: 2 })
        ));
        assert!(gateway.submissions().is_empty());
    }
}
