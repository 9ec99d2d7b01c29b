// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for timestamp and index resolution.

use super::RpcError;
use crate::chain::Chain;
use crate::retry::RetryError;
use crate::types::Index;

/// Errors that can abort a single resolution.
///
/// # Examples
///
/// ```rust
/// use blockstamp::{Chain, ResolveError};
///
/// let error = ResolveError::OutOfRange {
///     chain: Chain::Solana,
///     requested: 200_000,
///     latest: 100_000,
/// };
/// assert_eq!(
///     error.to_string(),
///     "Slot 200000 is out of range. Latest slot is 100000."
/// );
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// Every attempt of a retried remote call failed.
    #[error("Max retries exceeded after {attempts} attempts: {source}")]
    MaxRetriesExceeded {
        /// Number of attempts made
        attempts: u32,
        /// The error from the final attempt
        #[source]
        source: RpcError,
    },

    /// The remote source has no record for the index.
    #[error("No {} {index} on {chain}", .chain.index_noun())]
    NotFound {
        /// The chain that was queried
        chain: Chain,
        /// The missing block number or slot
        index: Index,
    },

    /// The requested index lies outside `[0, latest]`.
    #[error(
        "{} {requested} is out of range. Latest {} is {latest}.",
        .chain.index_label(),
        .chain.index_noun()
    )]
    OutOfRange {
        /// The chain that was queried
        chain: Chain,
        /// The index the caller asked for
        requested: i64,
        /// The chain's latest index at the time of the check
        latest: Index,
    },

    /// The requested index can never exist (negative block number).
    #[error("{} {requested} does not exist", .chain.index_label())]
    InvalidIndex {
        /// The chain that was queried
        chain: Chain,
        /// The index the caller asked for
        requested: i64,
    },

    /// A non-retryable RPC failure other than a missing record.
    #[error("RPC error: {0}")]
    Rpc(RpcError),
}

impl ResolveError {
    /// Create an `OutOfRange` error.
    pub fn out_of_range(chain: Chain, requested: i64, latest: Index) -> Self {
        ResolveError::OutOfRange {
            chain,
            requested,
            latest,
        }
    }
}

impl From<RpcError> for ResolveError {
    fn from(error: RpcError) -> Self {
        match error {
            RpcError::NotFound { chain, index } => ResolveError::NotFound { chain, index },
            other => ResolveError::Rpc(other),
        }
    }
}

impl From<RetryError<RpcError>> for ResolveError {
    fn from(error: RetryError<RpcError>) -> Self {
        match error {
            RetryError::Exhausted { attempts, last } => ResolveError::MaxRetriesExceeded {
                attempts,
                source: last,
            },
            RetryError::Aborted(error) => error.into(),
        }
    }
}
