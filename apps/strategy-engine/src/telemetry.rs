//! Tracing subscriber setup.
//!
//! Console-only structured logging with `EnvFilter`.
//!
//! # Configuration
//!
//! - `RUST_LOG`: Log filter (default: `info`)
//!
//! # Usage
//!
//! ```rust,ignore
//! use strategy_engine::telemetry::init_telemetry;
//!
//! fn main() {
//!     init_telemetry();
//!     // ... application code
//! }
//! ```

use tracing_subscriber::EnvFilter;

/// Initialize console tracing.
///
/// # Panics
///
/// Panics if a global subscriber is already installed.
pub fn init_telemetry() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .init();
}
