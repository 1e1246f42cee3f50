//! Engine Integration Tests
//!
//! End-to-end runs of the strategy use case over scripted port doubles:
//! every dispatch cell, the degenerate strike fallbacks, and the
//! no-second-leg-after-failure invariant.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use strategy_engine::application::ports::{BarInterval, HistorySpan};
use strategy_engine::application::use_cases::{
    RunStrategyError, RunStrategyParams, RunStrategyUseCase,
};
use strategy_engine::domain::market::{OptionChain, OptionContract};
use strategy_engine::domain::shared::Symbol;
use strategy_engine::domain::strategy::{Expirations, OrderSide, StrategyKind};
use strategy_engine::domain::signal::Trend;
use strategy_engine::infrastructure::mock::{MockMarketData, MockOrderGateway};

const NEAR: &str = "260918";
const FAR: &str = "261016";

fn near_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 9, 18).unwrap()
}

fn far_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
}

fn occ(date: &str, option_type: char, strike_thousandths: u32, iv: f64) -> OptionContract {
    let symbol = format!("AAPL{date}{option_type}{strike_thousandths:08}");
    OptionContract::from_occ(&symbol, iv).expect("valid OCC symbol")
}

/// Chain with strikes 95/100/105 on both sides at the near expiration and
/// a 100 call at the far expiration.
fn chain(iv: f64) -> OptionChain {
    OptionChain::new(
        Symbol::new("AAPL"),
        vec![
            occ(NEAR, 'C', 95_000, iv),
            occ(NEAR, 'C', 100_000, iv),
            occ(NEAR, 'C', 105_000, iv),
            occ(NEAR, 'P', 95_000, iv),
            occ(NEAR, 'P', 100_000, iv),
            occ(NEAR, 'P', 105_000, iv),
            occ(FAR, 'C', 100_000, iv),
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
        expirations: Expirations::new(near_date(), far_date()).unwrap(),
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

fn bearish_closes() -> Vec<Decimal> {
    vec![
        dec!(100),
        dec!(100),
        dec!(100),
        dec!(100),
        dec!(101),
        dec!(102),
        dec!(90),
    ]
}

fn flat_closes() -> Vec<Decimal> {
    vec![dec!(100); 7]
}

fn market_data(closes: &[Decimal], iv: f64) -> Arc<MockMarketData> {
    let market_data = MockMarketData::new();
    market_data.set_closes(closes);
    market_data.set_chain(chain(iv));
    market_data.set_spot(dec!(100));
    Arc::new(market_data)
}

#[tokio::test]
async fn bullish_low_iv_runs_bull_call_spread() {
    let gateway = Arc::new(MockOrderGateway::new());
    let use_case =
        RunStrategyUseCase::new(market_data(&bullish_closes(), 0.2), gateway.clone(), params());

    let report = use_case.execute().await.unwrap();
    assert_eq!(report.trend, Trend::Bullish);
    assert_eq!(report.kind, StrategyKind::BullCallSpread);
    assert_eq!(report.acks.len(), 2);

    // Strikes 95/100/105, spot 100, distance 2: buy the 95 call, sell the
    // 105 call.
    let submissions = gateway.submissions();
    assert_eq!(submissions[0].side, OrderSide::Buy);
    assert_eq!(submissions[0].contract_id.as_str(), "AAPL260918C00095000");
    assert_eq!(submissions[1].side, OrderSide::Sell);
    assert_eq!(submissions[1].contract_id.as_str(), "AAPL260918C00105000");
}

#[tokio::test]
async fn bullish_high_iv_runs_long_call() {
    let gateway = Arc::new(MockOrderGateway::new());
    let use_case =
        RunStrategyUseCase::new(market_data(&bullish_closes(), 0.5), gateway.clone(), params());

    let report = use_case.execute().await.unwrap();
    assert_eq!(report.kind, StrategyKind::LongCall);
    assert_eq!(report.acks.len(), 1);
    assert_eq!(
        gateway.submissions()[0].contract_id.as_str(),
        "AAPL260918C00100000"
    );
}

#[tokio::test]
async fn bearish_low_iv_runs_bear_put_spread() {
    let gateway = Arc::new(MockOrderGateway::new());
    let use_case =
        RunStrategyUseCase::new(market_data(&bearish_closes(), 0.2), gateway.clone(), params());

    let report = use_case.execute().await.unwrap();
    assert_eq!(report.trend, Trend::Bearish);
    assert_eq!(report.kind, StrategyKind::BearPutSpread);

    let submissions = gateway.submissions();
    assert_eq!(submissions[0].side, OrderSide::Buy);
    assert_eq!(submissions[0].contract_id.as_str(), "AAPL260918P00105000");
    assert_eq!(submissions[1].side, OrderSide::Sell);
    assert_eq!(submissions[1].contract_id.as_str(), "AAPL260918P00095000");
}

#[tokio::test]
async fn bearish_high_iv_runs_long_put() {
    let gateway = Arc::new(MockOrderGateway::new());
    let use_case =
        RunStrategyUseCase::new(market_data(&bearish_closes(), 0.4), gateway.clone(), params());

    let report = use_case.execute().await.unwrap();
    assert_eq!(report.kind, StrategyKind::LongPut);
    assert_eq!(report.acks.len(), 1);
}

#[tokio::test]
async fn neutral_high_iv_runs_straddle() {
    let gateway = Arc::new(MockOrderGateway::new());
    let use_case =
        RunStrategyUseCase::new(market_data(&flat_closes(), 0.5), gateway.clone(), params());

    let report = use_case.execute().await.unwrap();
    assert_eq!(report.trend, Trend::Neutral);
    assert_eq!(report.kind, StrategyKind::LongStraddle);

    let submissions = gateway.submissions();
    assert_eq!(submissions.len(), 2);
    assert!(submissions.iter().all(|leg| leg.side == OrderSide::Buy));
    assert_eq!(submissions[0].contract_id.as_str(), "AAPL260918C00100000");
    assert_eq!(submissions[1].contract_id.as_str(), "AAPL260918P00100000");
}

#[tokio::test]
async fn neutral_low_iv_runs_calendar_spread() {
    let gateway = Arc::new(MockOrderGateway::new());
    let use_case =
        RunStrategyUseCase::new(market_data(&flat_closes(), 0.2), gateway.clone(), params());

    let report = use_case.execute().await.unwrap();
    assert_eq!(report.kind, StrategyKind::CalendarCallSpread);

    let submissions = gateway.submissions();
    assert_eq!(submissions[0].side, OrderSide::Sell);
    assert_eq!(submissions[0].contract_id.as_str(), "AAPL260918C00100000");
    assert_eq!(submissions[1].side, OrderSide::Buy);
    assert_eq!(submissions[1].contract_id.as_str(), "AAPL261016C00100000");
}

#[tokio::test]
async fn failed_first_leg_never_submits_second() {
    let gateway = Arc::new(MockOrderGateway::new());
    gateway.set_fail_at(0);
    let use_case =
        RunStrategyUseCase::new(market_data(&bullish_closes(), 0.2), gateway.clone(), params());

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
    assert!(gateway.submissions().is_empty());
}

#[tokio::test]
async fn empty_chain_reports_before_any_submission() {
    let market_data = MockMarketData::new();
    market_data.set_closes(&bullish_closes());
    market_data.set_chain(OptionChain::new(Symbol::new("AAPL"), vec![]));
    market_data.set_spot(dec!(100));

    let gateway = Arc::new(MockOrderGateway::new());
    let use_case = RunStrategyUseCase::new(Arc::new(market_data), gateway.clone(), params());

    let err = use_case.execute().await.unwrap_err();
    assert!(matches!(err, RunStrategyError::Strategy(_)));
    assert!(gateway.submissions().is_empty());
}

#[tokio::test]
async fn insufficient_history_reports_before_any_submission() {
    let market_data = MockMarketData::new();
    market_data.set_closes(&[dec!(100), dec!(101), dec!(102)]);
    market_data.set_chain(chain(0.2));

    let gateway = Arc::new(MockOrderGateway::new());
    let use_case = RunStrategyUseCase::new(Arc::new(market_data), gateway.clone(), params());

    let err = use_case.execute().await.unwrap_err();
    assert!(matches!(err, RunStrategyError::Signal(_)));
    assert!(gateway.submissions().is_empty());
}
