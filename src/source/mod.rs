// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Remote point sources
//!
//! A point source answers two questions about one chain: what is the latest
//! index, and what is the timestamp of index `N`. Resolution is written
//! entirely against the [`PointSource`] trait, so it can be driven by a real
//! JSON-RPC endpoint ([`EvmPointSource`], [`SolanaPointSource`]) or by a
//! synthetic timeline in tests.
//!
//! # Examples
//!
//! ```rust,ignore
//! use blockstamp::source::{connect_http, EvmPointSource, PointSource};
//! use blockstamp::Chain;
//!
//! let client = connect_http(Chain::Evm, "https://eth.llamarpc.com".parse()?, true);
//! let source = EvmPointSource::new(client);
//!
//! let head = source.latest_index().await?;
//! let ts = source.timestamp_at(head).await?;
//! ```

use alloy_rpc_client::{ClientBuilder, RpcClient};
use async_trait::async_trait;
use url::Url;

use crate::chain::Chain;
use crate::errors::RpcError;
use crate::transport::LoggingLayer;
use crate::types::{Index, UnixTimestamp};

mod evm;
mod solana;

pub use evm::EvmPointSource;
pub use solana::SolanaPointSource;

/// Remote answers to "latest index" and "timestamp at index" for one chain
///
/// Implementations make exactly one remote call per method invocation; retry
/// and caching are layered on top by the resolver.
#[async_trait]
pub trait PointSource: Send + Sync {
    /// The chain this source queries
    fn chain(&self) -> Chain;

    /// The chain head: latest block number or slot
    async fn latest_index(&self) -> Result<Index, RpcError>;

    /// Timestamp recorded for `index`
    ///
    /// Fails with [`RpcError::NotFound`] when the node has no record for the
    /// index (block not produced yet, slot skipped).
    async fn timestamp_at(&self, index: Index) -> Result<UnixTimestamp, RpcError>;
}

/// Create an HTTP JSON-RPC client for `chain`'s endpoint
///
/// With `logging` enabled every call is recorded through [`LoggingLayer`].
pub fn connect_http(chain: Chain, url: Url, logging: bool) -> RpcClient {
    if logging {
        ClientBuilder::default()
            .layer(LoggingLayer::new(chain))
            .http(url)
    } else {
        ClientBuilder::default().http(url)
    }
}
