// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::too_many_lines,
        clippy::match_same_arms,
        clippy::needless_pass_by_value,
        clippy::items_after_statements
    )
)]

//! Strategy Engine - Rust Core Library
//!
//! Single-shot options strategy selector for the Strata trading system.
//!
//! # Architecture (Clean Architecture + Hexagonal)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: Core business logic with no I/O
//!   - `market`: Price bars, option contracts, strike selection
//!   - `signal`: EMA computation, trend crossover classification
//!   - `strategy`: Strategy templates, dispatch table, order requests
//!
//! - **Application**: Use cases and orchestration
//!   - `ports`: Interfaces for external systems (`MarketDataPort`,
//!     `OrderGatewayPort`)
//!   - `use_cases`: `RunStrategy`, one fetch/classify/dispatch/submit pass
//!
//! - **Infrastructure**: Adapters (implementations)
//!   - `broker`: Alpaca market data and order gateway adapters
//!   - `mock`: Scripted port doubles for integration tests
//!
//! Each invocation is independent and synchronous: one market-data fetch,
//! one classification pass, one strategy execution. There is no scheduler,
//! no cache, and no persistent state.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Clean Architecture Layers
// =============================================================================

/// Domain layer - Core business logic with no external dependencies.
pub mod domain;

/// Application layer - Use cases and port definitions.
pub mod application;

/// Infrastructure layer - Adapters and external integrations.
pub mod infrastructure;

/// Configuration loading and validation.
pub mod config;

/// Tracing subscriber setup.
pub mod telemetry;

// =============================================================================
// Re-exports
// =============================================================================

// Domain re-exports
pub use domain::market::{
    OptionChain, OptionContract, OptionType, PriceBar, find_contract_by_strike,
    select_atm_strike, select_higher_strike, select_lower_strike,
};
pub use domain::signal::{Trend, classify_trend, ema_series};
pub use domain::strategy::{
    Expirations, OrderKind, OrderRequest, OrderSide, StrategyError, StrategyKind, StrategyPlan,
    average_atm_iv, build_plan, select_strategy,
};
pub use domain::shared::{BrokerId, ContractId, OrderId, Symbol, Timestamp};

// Application re-exports
pub use application::ports::{
    BarInterval, GatewayError, HistorySpan, MarketDataError, MarketDataPort, OrderAck,
    OrderGatewayPort, OrderStatus,
};
pub use application::use_cases::{
    RunStrategyError, RunStrategyParams, RunStrategyUseCase, StrategyReport,
};

// Infrastructure re-exports
pub use infrastructure::broker::alpaca::{
    AlpacaConfig, AlpacaEnvironment, AlpacaError, AlpacaMarketData, AlpacaOrderGateway,
};
pub use infrastructure::mock::{MockMarketData, MockOrderGateway};
