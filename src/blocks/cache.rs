// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Per-chain memoization of index → timestamp lookups
//!
//! An index's timestamp never changes once the block or slot exists, so
//! entries are never evicted or expired. The cache grows for the lifetime of
//! the resolver that owns it.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::debug;

use crate::chain::Chain;
use crate::errors::{ResolveError, RpcError};
use crate::retry::{retry, RetryPolicy};
use crate::types::{Index, UnixTimestamp};

/// Statistics about cache performance
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    /// Lookups answered from the cache
    pub hits: u64,
    /// Lookups that had to go to the remote source
    pub misses: u64,
    /// Current number of entries in the cache
    pub entries: usize,
}

impl CacheStats {
    /// Calculates the cache hit rate as a percentage (0.0 to 100.0)
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hits={}, misses={}, entries={}, hit_rate={:.1}%",
            self.hits,
            self.misses,
            self.entries,
            self.hit_rate()
        )
    }
}

#[derive(Debug, Default)]
struct PointCacheState {
    entries: HashMap<Index, UnixTimestamp>,
    stats: CacheStats,
}

/// Append-only cache of point lookups for one chain
///
/// The lock only guards map access; it is released while a remote fetch is in
/// flight. Two concurrent misses on the same index may therefore both fetch
/// and both insert. The value is fully determined by the index, so the second
/// write is a no-op in effect.
///
/// # Examples
///
/// ```rust,ignore
/// use blockstamp::blocks::PointCache;
/// use blockstamp::retry::RetryPolicy;
///
/// let cache = PointCache::new(Chain::Evm);
/// let ts = cache
///     .get_or_fetch(123_456, &RetryPolicy::default(), || source.timestamp_at(123_456))
///     .await?;
/// ```
#[derive(Debug)]
pub struct PointCache {
    chain: Chain,
    state: Mutex<PointCacheState>,
}

impl PointCache {
    /// Creates an empty cache for `chain`
    pub fn new(chain: Chain) -> Self {
        Self {
            chain,
            state: Mutex::new(PointCacheState::default()),
        }
    }

    /// The chain this cache belongs to
    pub fn chain(&self) -> Chain {
        self.chain
    }

    /// Looks up a cached timestamp, recording a hit or miss
    pub async fn get(&self, index: Index) -> Option<UnixTimestamp> {
        let mut state = self.state.lock().await;
        let cached = state.entries.get(&index).copied();
        if cached.is_some() {
            state.stats.hits += 1;
        } else {
            state.stats.misses += 1;
        }
        cached
    }

    /// Stores a timestamp for `index`
    pub async fn insert(&self, index: Index, timestamp: UnixTimestamp) {
        let mut state = self.state.lock().await;
        state.entries.insert(index, timestamp);
        state.stats.entries = state.entries.len();
    }

    /// Returns the cached timestamp for `index`, fetching it on a miss
    ///
    /// `fetch` runs through [`retry`] with `policy`; only a successful result is
    /// stored. A cached value never triggers a remote call.
    pub async fn get_or_fetch<F, Fut>(
        &self,
        index: Index,
        policy: &RetryPolicy,
        fetch: F,
    ) -> Result<UnixTimestamp, ResolveError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<UnixTimestamp, RpcError>>,
    {
        if let Some(timestamp) = self.get(index).await {
            return Ok(timestamp);
        }

        let timestamp = retry(policy, fetch).await?;
        debug!(chain = %self.chain, index, timestamp = %timestamp, "Caching point lookup");
        self.insert(index, timestamp).await;
        Ok(timestamp)
    }

    /// Returns current cache statistics
    pub async fn stats(&self) -> CacheStats {
        self.state.lock().await.stats.clone()
    }

    /// Number of cached indices
    pub async fn len(&self) -> usize {
        self.state.lock().await.entries.len()
    }

    /// Returns true if nothing has been cached yet
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
