// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! # Blockstamp
//!
//! Resolve Unix timestamps to the closest block (EVM) or slot (Solana), and
//! blocks or slots back to their timestamps.
//!
//! Resolution binary-searches index space with remote "timestamp at index"
//! lookups. Every lookup is retried with a fixed delay and memoized per chain.
//! On Solana, where slot time is only approximately linear, the search result
//! is refined by probing nearby slots.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use blockstamp::source::{connect_http, EvmPointSource};
//! use blockstamp::{Chain, ChainResolver, ResolverConfig, UnixTimestamp};
//!
//! let client = connect_http(Chain::Evm, "https://eth.llamarpc.com".parse()?, false);
//! let resolver = ChainResolver::new(EvmPointSource::new(client), ResolverConfig::default());
//!
//! let block = resolver.index_for_timestamp(UnixTimestamp(1_700_000_000)).await?;
//! ```

pub mod api;
pub mod blocks;
pub mod bootstrap;
pub mod chain;
pub mod config;
pub mod errors;
pub mod retry;
pub mod source;
pub mod transport;
mod tracing;
pub mod types;

pub use blocks::{CacheStats, ChainResolver, Closest, PointCache, Resolvers};
pub use chain::{Chain, ParseChainError};
pub use config::{ConfigError, RefineWindow, ResolverConfig, ResolverConfigBuilder, ServiceConfig};
pub use errors::{ApiError, ResolveError, RpcError};
pub use retry::{RetryError, RetryPolicy, Retryable};
pub use source::{EvmPointSource, PointSource, SolanaPointSource};
pub use types::{Index, UnixTimestamp};
