//! Configuration module for the strategy engine.
//!
//! Layered loading: defaults → optional `config.yaml` → environment
//! override (prefix `ENGINE`, `__` separator, e.g.
//! `ENGINE__BROKER__API_KEY`). Every tunable the dispatch logic uses is
//! configuration, never a hardcoded constant.
//!
//! # Usage
//!
//! ```rust,ignore
//! use strategy_engine::config::load_config;
//!
//! let config = load_config(None)?;
//! let params = config.to_params()?;
//! ```

mod brokers;
mod strategy;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use brokers::{BrokerConfig, TradingEnvironment};
pub use strategy::StrategyConfig;

use crate::application::use_cases::RunStrategyParams;
use crate::domain::shared::Symbol;
use crate::domain::strategy::Expirations;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The underlying source could not be loaded or deserialized.
    #[error("configuration error: {0}")]
    Load(#[from] config::ConfigError),

    /// The configuration loaded but fails a startup invariant.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Root configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Strategy tunables.
    pub strategy: StrategyConfig,
    /// Broker session settings.
    pub broker: BrokerConfig,
}

impl Config {
    /// Validate startup invariants.
    ///
    /// # Errors
    ///
    /// `Invalid` on missing credentials, bad window ordering, non-positive
    /// tunables, or a far expiration not after the near one.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.broker.api_key.is_empty() || self.broker.api_secret.is_empty() {
            return Err(ConfigError::Invalid(
                "broker credentials are required (ENGINE__BROKER__API_KEY / ENGINE__BROKER__API_SECRET)"
                    .to_string(),
            ));
        }
        if self.strategy.symbol.trim().is_empty() {
            return Err(ConfigError::Invalid("symbol must not be empty".to_string()));
        }
        if self.strategy.short_window == 0 || self.strategy.long_window == 0 {
            return Err(ConfigError::Invalid(
                "EMA windows must be at least 1".to_string(),
            ));
        }
        if self.strategy.short_window >= self.strategy.long_window {
            return Err(ConfigError::Invalid(format!(
                "short window ({}) must be below long window ({})",
                self.strategy.short_window, self.strategy.long_window
            )));
        }
        if self.strategy.iv_threshold <= 0.0 {
            return Err(ConfigError::Invalid(
                "iv_threshold must be positive".to_string(),
            ));
        }
        if self.strategy.strike_distance.is_sign_negative()
            || self.strategy.strike_distance.is_zero()
        {
            return Err(ConfigError::Invalid(
                "strike_distance must be positive".to_string(),
            ));
        }
        if self.strategy.far_expiration <= self.strategy.near_expiration {
            return Err(ConfigError::Invalid(format!(
                "far expiration ({}) must be after near expiration ({})",
                self.strategy.far_expiration, self.strategy.near_expiration
            )));
        }
        Ok(())
    }

    /// Build the use-case parameters from the validated configuration.
    ///
    /// # Errors
    ///
    /// `Invalid` when the expiration pair fails domain validation.
    pub fn to_params(&self) -> Result<RunStrategyParams, ConfigError> {
        let expirations =
            Expirations::new(self.strategy.near_expiration, self.strategy.far_expiration)
                .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        Ok(RunStrategyParams {
            symbol: Symbol::new(&self.strategy.symbol),
            interval: self.strategy.interval,
            span: self.strategy.span,
            short_window: self.strategy.short_window,
            long_window: self.strategy.long_window,
            iv_threshold: self.strategy.iv_threshold,
            strike_distance: self.strategy.strike_distance,
            expirations,
        })
    }
}

/// Load configuration from the default path (`config.yaml`) or a custom
/// one, with environment override.
///
/// # Errors
///
/// `Load` on unreadable/undeserializable sources, `Invalid` on failed
/// startup validation.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let file = config::File::with_name(path.unwrap_or("config")).required(false);
    let environment = config::Environment::with_prefix("ENGINE")
        .separator("__")
        .try_parsing(true);

    let loaded: Config = config::Config::builder()
        .add_source(file)
        .add_source(environment)
        .build()?
        .try_deserialize()?;

    loaded.validate()?;
    Ok(loaded)
}
