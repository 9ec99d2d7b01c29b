// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Resolution facade: timestamp → index and index → timestamp per chain
//!
//! # Examples
//!
//! ```rust,ignore
//! use blockstamp::source::{connect_http, SolanaPointSource};
//! use blockstamp::{Chain, ChainResolver, ResolverConfig, UnixTimestamp};
//!
//! let client = connect_http(Chain::Solana, "https://api.mainnet-beta.solana.com".parse()?, false);
//! let resolver = ChainResolver::new(SolanaPointSource::new(client), ResolverConfig::default());
//!
//! let slot = resolver.index_for_timestamp(UnixTimestamp(1_700_000_000)).await?;
//! let ts = resolver.timestamp_for_index(slot as i64).await?;
//! ```

use tracing::{debug, info, Instrument};

use super::cache::{CacheStats, PointCache};
use super::search::{closest_index, refine};
use crate::chain::Chain;
use crate::config::ResolverConfig;
use crate::errors::ResolveError;
use crate::retry::retry;
use crate::source::PointSource;
use crate::tracing::spans;
use crate::types::{Index, UnixTimestamp};

/// Resolves timestamps and indices for one chain
///
/// Owns the chain's point source and its point cache. Every remote lookup
/// runs through the configured retry policy; point lookups are memoized for
/// the lifetime of the resolver, the chain head never is.
pub struct ChainResolver {
    source: Box<dyn PointSource>,
    cache: PointCache,
    config: ResolverConfig,
}

impl ChainResolver {
    /// Creates a resolver over `source` with an empty cache
    pub fn new<S>(source: S, config: ResolverConfig) -> Self
    where
        S: PointSource + 'static,
    {
        let chain = source.chain();
        Self {
            source: Box::new(source),
            cache: PointCache::new(chain),
            config,
        }
    }

    /// The chain this resolver answers for
    pub fn chain(&self) -> Chain {
        self.source.chain()
    }

    /// Retry policy and refinement window in use
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Current point cache statistics
    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.stats().await
    }

    /// Finds the index whose timestamp is closest to `target`
    ///
    /// # Algorithm
    ///
    /// - **EVM**: binary search over `[0, latest]`
    /// - **Solana**: a target at or before slot 0's time resolves to slot 0
    ///   without searching; otherwise binary search followed by local
    ///   refinement around the result
    ///
    /// # Errors
    ///
    /// Any lookup failure during the binary search aborts the resolution.
    /// Failed probes during refinement are skipped.
    pub async fn index_for_timestamp(&self, target: UnixTimestamp) -> Result<Index, ResolveError> {
        let chain = self.chain();

        async move {
            if !chain.is_monotone() {
                match self.timestamp_at(0).await {
                    Ok(genesis) if target <= genesis => {
                        info!(index = 0, "Target at or before genesis");
                        return Ok(0);
                    }
                    Ok(_) => {}
                    // Pruned or skipped slot 0: fall through to the search
                    Err(ResolveError::NotFound { .. }) => {
                        debug!("No timestamp for index 0, skipping genesis check")
                    }
                    Err(e) => return Err(e),
                }
            }

            let latest = self.latest_index().await?;

            let seed = closest_index(target, latest, |index| self.timestamp_at(index))
                .instrument(spans::binary_search(chain, target, latest))
                .await?;

            let best = if chain.is_monotone() {
                seed
            } else {
                refine(seed, target, &self.config.refine, |index| {
                    self.timestamp_at(index)
                })
                .instrument(spans::refine(chain, seed.index, target))
                .await
            };

            info!(
                index = best.index,
                difference_secs = best.difference,
                latest,
                "Resolved timestamp"
            );
            Ok(best.index)
        }
        .instrument(spans::index_for_timestamp(chain, target))
        .await
    }

    /// Looks up the timestamp of `index`
    ///
    /// On EVM this is a direct cached lookup; a block past the head surfaces
    /// as [`ResolveError::NotFound`] and a negative block number as
    /// [`ResolveError::InvalidIndex`]. On Solana the head is fetched first and
    /// an index outside `[0, latest]` fails with [`ResolveError::OutOfRange`]
    /// before any point lookup.
    pub async fn timestamp_for_index(&self, index: i64) -> Result<UnixTimestamp, ResolveError> {
        let chain = self.chain();

        async move {
            let index = match chain {
                Chain::Evm => Index::try_from(index).map_err(|_| ResolveError::InvalidIndex {
                    chain,
                    requested: index,
                })?,
                Chain::Solana => {
                    let latest = self.latest_index().await?;
                    match Index::try_from(index) {
                        Ok(index) if index <= latest => index,
                        _ => return Err(ResolveError::out_of_range(chain, index, latest)),
                    }
                }
            };

            let timestamp = self.timestamp_at(index).await?;
            info!(index, timestamp = %timestamp, "Resolved index");
            Ok(timestamp)
        }
        .instrument(spans::timestamp_for_index(chain, index))
        .await
    }

    async fn timestamp_at(&self, index: Index) -> Result<UnixTimestamp, ResolveError> {
        self.cache
            .get_or_fetch(index, &self.config.retry, || self.source.timestamp_at(index))
            .instrument(spans::fetch_point(self.chain(), index))
            .await
    }

    async fn latest_index(&self) -> Result<Index, ResolveError> {
        retry(&self.config.retry, || self.source.latest_index())
            .instrument(spans::latest_index(self.chain()))
            .await
            .map_err(ResolveError::from)
    }
}

impl std::fmt::Debug for ChainResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainResolver")
            .field("chain", &self.chain())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// One resolver per supported chain
#[derive(Debug)]
pub struct Resolvers {
    evm: ChainResolver,
    solana: ChainResolver,
}

impl Resolvers {
    /// Pairs an EVM and a Solana resolver
    ///
    /// Returns `None` when either resolver is bound to the other chain.
    pub fn new(evm: ChainResolver, solana: ChainResolver) -> Option<Self> {
        (evm.chain() == Chain::Evm && solana.chain() == Chain::Solana)
            .then_some(Self { evm, solana })
    }

    /// The resolver for `chain`
    pub fn for_chain(&self, chain: Chain) -> &ChainResolver {
        match chain {
            Chain::Evm => &self.evm,
            Chain::Solana => &self.solana,
        }
    }
}
