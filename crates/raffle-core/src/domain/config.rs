//! Raffle configuration and validation
//!
//! Parameters are fixed when the raffle is created and never change
//! afterwards.
//!
//! # Example
//!
//! ```
//! use raffle_core::RaffleConfigBuilder;
//!
//! let config = RaffleConfigBuilder::new()
//!     .ticket_price(5)
//!     .commit_window_secs(3_600)
//!     .reveal_window_secs(600)
//!     .build()
//!     .expect("valid config");
//! assert_eq!(config.ticket_price, 5);
//! ```

use super::errors::{Amount, ConfigError};
use serde::{Deserialize, Serialize};
use std::env;

/// Default ticket price.
pub const DEFAULT_TICKET_PRICE: Amount = 1;

/// Default commit window (seconds).
pub const DEFAULT_COMMIT_WINDOW_SECS: u64 = 100_000;

/// Default reveal window (seconds).
pub const DEFAULT_REVEAL_WINDOW_SECS: u64 = 2_000;

/// Immutable round parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaffleConfig {
    /// Exact payment required per entry.
    pub ticket_price: Amount,
    /// Length of the commit phase in seconds.
    pub commit_window_secs: u64,
    /// Length of the reveal phase in seconds.
    pub reveal_window_secs: u64,
}

impl Default for RaffleConfig {
    fn default() -> Self {
        Self {
            ticket_price: DEFAULT_TICKET_PRICE,
            commit_window_secs: DEFAULT_COMMIT_WINDOW_SECS,
            reveal_window_secs: DEFAULT_REVEAL_WINDOW_SECS,
        }
    }
}

impl RaffleConfig {
    /// Create a new configuration with validation
    pub fn new(
        ticket_price: Amount,
        commit_window_secs: u64,
        reveal_window_secs: u64,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            ticket_price,
            commit_window_secs,
            reveal_window_secs,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ticket_price == 0 {
            return Err(ConfigError::ZeroTicketPrice);
        }
        if self.commit_window_secs == 0 {
            return Err(ConfigError::ZeroCommitWindow);
        }
        if self.reveal_window_secs == 0 {
            return Err(ConfigError::ZeroRevealWindow);
        }
        Ok(())
    }

    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `RAFFLE_TICKET_PRICE`: ticket price (default: 1)
    /// - `RAFFLE_COMMIT_WINDOW_SECS`: commit window (default: 100000)
    /// - `RAFFLE_REVEAL_WINDOW_SECS`: reveal window (default: 2000)
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self {
            ticket_price: env_or("RAFFLE_TICKET_PRICE", DEFAULT_TICKET_PRICE)?,
            commit_window_secs: env_or("RAFFLE_COMMIT_WINDOW_SECS", DEFAULT_COMMIT_WINDOW_SECS)?,
            reveal_window_secs: env_or("RAFFLE_REVEAL_WINDOW_SECS", DEFAULT_REVEAL_WINDOW_SECS)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Decode and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            value: raw,
        }),
        Err(env::VarError::NotPresent) => Ok(default),
        Err(env::VarError::NotUnicode(raw)) => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: raw.to_string_lossy().into_owned(),
        }),
    }
}

/// Fluent builder for [`RaffleConfig`].
#[derive(Clone, Debug, Default)]
pub struct RaffleConfigBuilder {
    config: RaffleConfig,
}

impl RaffleConfigBuilder {
    /// Start from the defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set ticket price.
    pub fn ticket_price(mut self, price: Amount) -> Self {
        self.config.ticket_price = price;
        self
    }

    /// Set commit window length.
    pub fn commit_window_secs(mut self, secs: u64) -> Self {
        self.config.commit_window_secs = secs;
        self
    }

    /// Set reveal window length.
    pub fn reveal_window_secs(mut self, secs: u64) -> Self {
        self.config.reveal_window_secs = secs;
        self
    }

    /// Validate and build.
    pub fn build(self) -> Result<RaffleConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
