//! Flow configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional, with the reference defaults:
//! - `DELIGHTS_DELIVERY_FEE` - Flat delivery fee in đồng (default: 15000)
//! - `DELIGHTS_COUNTDOWN_START` - Success-screen countdown start (default: 5)
//! - `DELIGHTS_PAYMENT_DELAY_MS` - Simulated gateway delay (default: 2000)
//! - `DELIGHTS_COUNTDOWN_TICK_MS` - Countdown tick interval (default: 1000)

use std::time::Duration;

use delights_core::Price;
use thiserror::Error;

const DEFAULT_DELIVERY_FEE: u64 = 15_000;
const DEFAULT_COUNTDOWN_START: u32 = 5;
const DEFAULT_PAYMENT_DELAY_MS: u64 = 2_000;
const DEFAULT_COUNTDOWN_TICK_MS: u64 = 1_000;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Tunable constants of the ordering flow.
///
/// The same config is read wherever a total is displayed, so the delivery
/// fee can never disagree between the cart, checkout, and payment screens.
#[derive(Debug, Clone)]
pub struct FlowConfig {
    /// Flat surcharge added to the cart subtotal.
    pub delivery_fee: Price,
    /// Where the success-screen countdown starts.
    pub countdown_start: u32,
    /// How long the simulated gateway takes to confirm.
    pub payment_delay: Duration,
    /// How often the success-screen countdown ticks.
    pub countdown_tick: Duration,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            delivery_fee: Price::new(DEFAULT_DELIVERY_FEE),
            countdown_start: DEFAULT_COUNTDOWN_START,
            payment_delay: Duration::from_millis(DEFAULT_PAYMENT_DELAY_MS),
            countdown_tick: Duration::from_millis(DEFAULT_COUNTDOWN_TICK_MS),
        }
    }
}

impl FlowConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a set variable fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Ok(Self {
            delivery_fee: Price::new(parse_env("DELIGHTS_DELIVERY_FEE", DEFAULT_DELIVERY_FEE)?),
            countdown_start: parse_env("DELIGHTS_COUNTDOWN_START", DEFAULT_COUNTDOWN_START)?,
            payment_delay: Duration::from_millis(parse_env(
                "DELIGHTS_PAYMENT_DELAY_MS",
                DEFAULT_PAYMENT_DELAY_MS,
            )?),
            countdown_tick: Duration::from_millis(parse_env(
                "DELIGHTS_COUNTDOWN_TICK_MS",
                DEFAULT_COUNTDOWN_TICK_MS,
            )?),
        })
    }
}

/// Parse an environment variable, falling back to `default` when unset.
fn parse_env<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: core::str::FromStr,
    T::Err: core::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_owned(), e.to_string())),
        Err(_) => Ok(default),
    }
}
