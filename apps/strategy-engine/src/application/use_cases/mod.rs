//! Application Use Cases

mod run_strategy;

pub use run_strategy::{
    RunStrategyError, RunStrategyParams, RunStrategyUseCase, StrategyReport,
};
