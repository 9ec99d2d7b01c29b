// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! RPC error types for remote point sources.
//!
//! A [`PointSource`](crate::source::PointSource) failure is one of three
//! kinds: the remote call itself failed (transport, HTTP status, malformed
//! JSON), the node answered with a value blockstamp cannot represent, or the
//! node answered but has no record for the requested index.

use alloy_transport::TransportError;

use crate::chain::Chain;
use crate::retry::Retryable;
use crate::types::Index;

/// Errors that can occur while querying a chain's JSON-RPC endpoint.
///
/// # Examples
///
/// ```rust
/// use blockstamp::{Chain, RpcError};
///
/// let error = RpcError::NotFound { chain: Chain::Solana, index: 42 };
/// assert_eq!(error.to_string(), "No slot 42 on solana");
/// ```
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    /// The remote call failed before producing a usable answer.
    ///
    /// Covers connection failures, timeouts, HTTP errors, JSON-RPC error
    /// responses and responses that could not be decoded. These are treated
    /// as transient and retried.
    #[error("{method} request to {chain} RPC failed: {source}")]
    RequestFailed {
        /// The chain whose endpoint was queried
        chain: Chain,
        /// JSON-RPC method name
        method: &'static str,
        /// The underlying transport error
        #[source]
        source: TransportError,
    },

    /// The node answered with a value that cannot be represented.
    ///
    /// Asking again returns the same answer, so this is not retried.
    #[error("Invalid {method} response from {chain} RPC: {reason}")]
    InvalidResponse {
        /// The chain whose endpoint was queried
        chain: Chain,
        /// JSON-RPC method name
        method: &'static str,
        /// What was wrong with the answer
        reason: String,
    },

    /// The node has no record for this index.
    ///
    /// On EVM this means the block has not been produced yet. On Solana the
    /// slot was skipped, or its block is no longer available.
    #[error("No {} {index} on {chain}", .chain.index_noun())]
    NotFound {
        /// The chain that was queried
        chain: Chain,
        /// The block number or slot that has no record
        index: Index,
    },
}

impl RpcError {
    /// Helper to create a `RequestFailed` error.
    pub fn request_failed(chain: Chain, method: &'static str, source: TransportError) -> Self {
        RpcError::RequestFailed {
            chain,
            method,
            source,
        }
    }

    /// Helper to create an `InvalidResponse` error.
    pub fn invalid_response(chain: Chain, method: &'static str, reason: impl Into<String>) -> Self {
        RpcError::InvalidResponse {
            chain,
            method,
            reason: reason.into(),
        }
    }

    /// Helper to create a `NotFound` error.
    pub fn not_found(chain: Chain, index: Index) -> Self {
        RpcError::NotFound { chain, index }
    }

    /// Returns true if the node reported no record for the index
    pub fn is_not_found(&self) -> bool {
        matches!(self, RpcError::NotFound { .. })
    }
}

impl Retryable for RpcError {
    fn is_retryable(&self) -> bool {
        // Missing records and unrepresentable values are answers, not failures
        matches!(self, RpcError::RequestFailed { .. })
    }
}
