// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Span creation helpers for blockstamp operations.
//!
//! Telemetry is kept out of the resolution logic: every instrumented operation
//! has a matching span helper here, and the operation attaches it to its future.
//!
//! Usage pattern:
//! ```rust,ignore
//! pub async fn my_operation(&self, param: Type) -> Result<T> {
//!     async move {
//!         // Business logic here
//!     }
//!     .instrument(spans::my_operation(param_value))
//!     .await
//! }
//! ```

use tracing::{Level, Span};

use crate::chain::Chain;
use crate::types::{Index, UnixTimestamp};

/// Create span for resolving a timestamp to the closest block or slot.
///
/// Parent: API request (if any)
/// Children: binary_search, refine
#[inline]
pub(crate) fn index_for_timestamp(chain: Chain, target: UnixTimestamp) -> Span {
    tracing::span!(
        Level::INFO,
        "blockstamp.index_for_timestamp",
        chain = %chain,
        target_ts = %target,
    )
}

/// Create span for looking up the timestamp of a block or slot.
///
/// Parent: API request (if any)
/// Children: fetch_point
#[inline]
pub(crate) fn timestamp_for_index(chain: Chain, index: i64) -> Span {
    tracing::span!(
        Level::INFO,
        "blockstamp.timestamp_for_index",
        chain = %chain,
        index = index,
    )
}

/// Create span for the binary search over `[0, latest]`.
///
/// Parent: index_for_timestamp
/// Children: fetch_point spans (one per probe)
#[inline]
pub(crate) fn binary_search(chain: Chain, target: UnixTimestamp, latest: Index) -> Span {
    tracing::debug_span!(
        "blockstamp.binary_search",
        chain = %chain,
        target_ts = %target,
        latest = latest,
    )
}

/// Create span for the local refinement around a binary-search result.
///
/// Parent: index_for_timestamp
/// Children: fetch_point spans (two per offset)
#[inline]
pub(crate) fn refine(chain: Chain, seed: Index, target: UnixTimestamp) -> Span {
    tracing::debug_span!(
        "blockstamp.refine",
        chain = %chain,
        seed = seed,
        target_ts = %target,
    )
}

/// Create span for a single cached point lookup.
#[inline]
pub(crate) fn fetch_point(chain: Chain, index: Index) -> Span {
    tracing::trace_span!("blockstamp.fetch_point", chain = %chain, index = index)
}

/// Create span for fetching the chain head.
#[inline]
pub(crate) fn latest_index(chain: Chain) -> Span {
    tracing::trace_span!("blockstamp.latest_index", chain = %chain)
}
