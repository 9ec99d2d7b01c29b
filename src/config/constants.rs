// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Tuning constants and defaults
//!
//! This module centralizes the magic numbers used by the resolution pipeline
//! so they can be found (and overridden through [`ResolverConfig`](super::ResolverConfig))
//! in one place.

/// Default number of attempts for a remote lookup, including the first
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default fixed delay between attempts of a remote lookup
pub const DEFAULT_RETRY_DELAY_MS: u64 = 1000;

/// Largest offset probed on each side of the binary-search result during
/// Solana slot refinement
pub const MAX_SEARCH_OFFSET: u64 = 100;

/// Refinement stops once a slot within this many seconds of the target is found
pub const TIME_DIFFERENCE_THRESHOLD_SECS: u64 = 60;

/// Port the HTTP API listens on when `API_PORT` is unset
pub const DEFAULT_API_PORT: u16 = 3000;

/// Environment variables read by [`ServiceConfig::from_env`](super::ServiceConfig::from_env)
pub mod env {
    pub const EVM_RPC_URL: &str = "EVM_RPC_URL";
    pub const SOLANA_RPC_URL: &str = "SOLANA_RPC_URL";
    pub const API_PORT: &str = "API_PORT";
    pub const RETRY_MAX_ATTEMPTS: &str = "RETRY_MAX_ATTEMPTS";
    pub const RETRY_DELAY_MS: &str = "RETRY_DELAY_MS";
    /// Any of `1`, `true`, `yes` enables per-call RPC logging
    pub const RPC_LOGGING: &str = "RPC_LOGGING";
}
