// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Configuration for blockstamp
//!
//! Two layers of configuration exist:
//!
//! - [`ResolverConfig`] controls the resolution pipeline itself: the retry
//!   policy for remote lookups and the Solana refinement window.
//! - [`ServiceConfig`] adds what the HTTP service needs to start: RPC
//!   endpoints, listen port and transport logging. It is read from the
//!   environment (and `.env`, via `dotenvy`).
//!
//! # Example: Using defaults
//!
//! ```rust
//! use blockstamp::ResolverConfig;
//!
//! // 3 attempts, 1s apart; refine ±100 slots until within 60s
//! let config = ResolverConfig::default();
//! assert_eq!(config.retry.max_attempts, 3);
//! ```
//!
//! # Example: Custom configuration
//!
//! ```rust
//! use blockstamp::ResolverConfigBuilder;
//! use std::time::Duration;
//!
//! let config = ResolverConfigBuilder::new()
//!     .max_attempts(5)
//!     .retry_delay(Duration::from_millis(200))
//!     .max_search_offset(50)
//!     .build();
//! assert_eq!(config.refine.max_offset, 50);
//! ```

use std::time::Duration;

use url::Url;

use crate::retry::RetryPolicy;

pub mod constants;

use constants::{env, DEFAULT_API_PORT, MAX_SEARCH_OFFSET, TIME_DIFFERENCE_THRESHOLD_SECS};

/// Bounds of the local search run after binary search on non-monotone chains
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefineWindow {
    /// Largest offset probed on each side of the seed index
    pub max_offset: u64,
    /// Refinement stops once the best difference is at or below this many seconds
    pub threshold_secs: u64,
}

impl Default for RefineWindow {
    fn default() -> Self {
        Self {
            max_offset: MAX_SEARCH_OFFSET,
            threshold_secs: TIME_DIFFERENCE_THRESHOLD_SECS,
        }
    }
}

/// Configuration of a chain resolver
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Retry policy applied to every remote lookup
    pub retry: RetryPolicy,
    /// Refinement window for non-monotone chains
    pub refine: RefineWindow,
}

/// Builder for [`ResolverConfig`]
///
/// # Example
///
/// ```rust
/// use blockstamp::ResolverConfigBuilder;
/// use std::time::Duration;
///
/// let config = ResolverConfigBuilder::new()
///     .retry_delay(Duration::ZERO)
///     .time_difference_threshold(30)
///     .build();
/// assert_eq!(config.refine.threshold_secs, 30);
/// ```
#[derive(Debug, Default)]
pub struct ResolverConfigBuilder {
    config: ResolverConfig,
}

impl ResolverConfigBuilder {
    /// Create a new builder starting from the defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the total number of attempts per remote lookup
    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.config.retry.max_attempts = attempts;
        self
    }

    /// Set the fixed delay between attempts
    pub fn retry_delay(mut self, delay: Duration) -> Self {
        self.config.retry.delay = delay;
        self
    }

    /// Replace the whole retry policy
    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.config.retry = policy;
        self
    }

    /// Set the largest offset probed during refinement
    pub fn max_search_offset(mut self, offset: u64) -> Self {
        self.config.refine.max_offset = offset;
        self
    }

    /// Set the "close enough" threshold, in seconds, that ends refinement early
    pub fn time_difference_threshold(mut self, secs: u64) -> Self {
        self.config.refine.threshold_secs = secs;
        self
    }

    /// Build the configuration
    pub fn build(self) -> ResolverConfig {
        self.config
    }
}

/// Errors while reading the service configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is not set
    #[error("Missing required environment variable {var}")]
    Missing {
        /// Variable name
        var: &'static str,
    },

    /// A variable is set but cannot be parsed
    #[error("Invalid value '{value}' for {var}: {reason}")]
    Invalid {
        /// Variable name
        var: &'static str,
        /// The raw value
        value: String,
        /// Why it was rejected
        reason: String,
    },
}

/// Everything the HTTP service needs to start
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// JSON-RPC endpoint of the EVM chain
    pub evm_rpc_url: Url,
    /// JSON-RPC endpoint of the Solana cluster
    pub solana_rpc_url: Url,
    /// Port the API listens on
    pub port: u16,
    /// Log every RPC call (method, duration, errors)
    pub rpc_logging: bool,
    /// Resolution pipeline settings
    pub resolver: ResolverConfig,
}

impl ServiceConfig {
    /// Read the configuration from the process environment
    ///
    /// Call `dotenvy::dotenv()` first to also pick up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| dotenvy::var(var).ok())
    }

    /// Read the configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let evm_rpc_url = required_url(&lookup, env::EVM_RPC_URL)?;
        let solana_rpc_url = required_url(&lookup, env::SOLANA_RPC_URL)?;
        let port = parsed(&lookup, env::API_PORT)?.unwrap_or(DEFAULT_API_PORT);

        let mut builder = ResolverConfigBuilder::new();
        if let Some(attempts) = parsed(&lookup, env::RETRY_MAX_ATTEMPTS)? {
            builder = builder.max_attempts(attempts);
        }
        if let Some(delay_ms) = parsed::<u64, _>(&lookup, env::RETRY_DELAY_MS)? {
            builder = builder.retry_delay(Duration::from_millis(delay_ms));
        }

        let rpc_logging = lookup(env::RPC_LOGGING)
            .map(|value| matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            evm_rpc_url,
            solana_rpc_url,
            port,
            rpc_logging,
            resolver: builder.build(),
        })
    }
}

fn required_url<F>(lookup: &F, var: &'static str) -> Result<Url, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(var).ok_or(ConfigError::Missing { var })?;
    value.parse().map_err(|e: url::ParseError| ConfigError::Invalid {
        var,
        reason: e.to_string(),
        value,
    })
}

fn parsed<T, F>(lookup: &F, var: &'static str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    lookup(var)
        .map(|value| {
            value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
                var,
                reason: e.to_string(),
                value,
            })
        })
        .transpose()
}
