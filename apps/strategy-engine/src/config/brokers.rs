//! Broker session settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::infrastructure::broker::alpaca::{AlpacaConfig, AlpacaEnvironment, RetryConfig};

/// Trading environment selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradingEnvironment {
    /// Paper trading (simulated). The default; live is opt-in.
    #[default]
    Paper,
    /// Live trading (real money).
    Live,
}

impl From<TradingEnvironment> for AlpacaEnvironment {
    fn from(environment: TradingEnvironment) -> Self {
        match environment {
            TradingEnvironment::Paper => Self::Paper,
            TradingEnvironment::Live => Self::Live,
        }
    }
}

/// Broker session configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrokerConfig {
    /// API key.
    pub api_key: String,
    /// API secret.
    pub api_secret: String,
    /// Trading environment.
    pub environment: TradingEnvironment,
    /// HTTP request timeout in seconds.
    pub timeout_secs: u64,
    /// Maximum retry attempts for transient HTTP failures.
    pub retry_max_attempts: u32,
    /// Initial retry backoff in milliseconds.
    pub retry_initial_backoff_ms: u64,
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_secret: String::new(),
            environment: TradingEnvironment::default(),
            timeout_secs: default_timeout_secs(),
            retry_max_attempts: default_retry_max_attempts(),
            retry_initial_backoff_ms: default_retry_initial_backoff_ms(),
        }
    }
}

impl BrokerConfig {
    /// Build the adapter session config.
    #[must_use]
    pub fn to_alpaca(&self) -> AlpacaConfig {
        AlpacaConfig::new(
            self.api_key.clone(),
            self.api_secret.clone(),
            self.environment.into(),
        )
        .with_timeout(Duration::from_secs(self.timeout_secs))
        .with_retry(RetryConfig {
            max_attempts: self.retry_max_attempts,
            initial_backoff: Duration::from_millis(self.retry_initial_backoff_ms),
            ..RetryConfig::default()
        })
    }
}

const fn default_timeout_secs() -> u64 {
    30
}

const fn default_retry_max_attempts() -> u32 {
    3
}

const fn default_retry_initial_backoff_ms() -> u64 {
    100
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_defaults_to_paper() {
        let parsed: BrokerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed.environment, TradingEnvironment::Paper);
    }

    #[test]
    fn to_alpaca_carries_session_settings() {
        let broker = BrokerConfig {
            api_key: "key".to_string(),
            api_secret: "secret".to_string(),
            environment: TradingEnvironment::Live,
            timeout_secs: 10,
            retry_max_attempts: 5,
            retry_initial_backoff_ms: 250,
        };
        let alpaca = broker.to_alpaca();
        assert!(alpaca.environment.is_live());
        assert_eq!(alpaca.timeout, Duration::from_secs(10));
        assert_eq!(alpaca.retry.max_attempts, 5);
        assert_eq!(alpaca.retry.initial_backoff, Duration::from_millis(250));
    }

    #[test]
    fn environment_parses_uppercase() {
        let parsed: TradingEnvironment = serde_json::from_str(r#""LIVE""#).unwrap();
        assert_eq!(parsed, TradingEnvironment::Live);
    }
}
