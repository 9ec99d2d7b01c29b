// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Solana point source over `getSlot` / `getBlockTime`

use alloy_rpc_client::RpcClient;
use alloy_transport::TransportError;
use async_trait::async_trait;

use super::PointSource;
use crate::chain::Chain;
use crate::errors::RpcError;
use crate::types::{Index, UnixTimestamp};

const GET_SLOT: &str = "getSlot";
const GET_BLOCK_TIME: &str = "getBlockTime";

/// JSON-RPC error codes Solana nodes use for slots without a block
mod error_codes {
    pub const BLOCK_NOT_AVAILABLE: i64 = -32004;
    pub const SLOT_SKIPPED: i64 = -32007;
    pub const LONG_TERM_STORAGE_SLOT_SKIPPED: i64 = -32009;
}

/// Point source for Solana
///
/// Skipped slots are reported as [`RpcError::NotFound`], whether the node
/// answers `null` or one of the "slot skipped / block not available" error
/// codes. They are never defaulted to a zero timestamp.
#[derive(Clone, Debug)]
pub struct SolanaPointSource {
    client: RpcClient,
}

impl SolanaPointSource {
    /// Creates a source over a Solana JSON-RPC client
    pub fn new(client: RpcClient) -> Self {
        Self { client }
    }
}

fn is_missing_block(error: &TransportError) -> bool {
    error.as_error_resp().is_some_and(|payload| {
        matches!(
            payload.code,
            error_codes::BLOCK_NOT_AVAILABLE
                | error_codes::SLOT_SKIPPED
                | error_codes::LONG_TERM_STORAGE_SLOT_SKIPPED
        )
    })
}

#[async_trait]
impl PointSource for SolanaPointSource {
    fn chain(&self) -> Chain {
        Chain::Solana
    }

    async fn latest_index(&self) -> Result<Index, RpcError> {
        self.client
            .request_noparams(GET_SLOT)
            .await
            .map_err(|e| RpcError::request_failed(Chain::Solana, GET_SLOT, e))
    }

    async fn timestamp_at(&self, index: Index) -> Result<UnixTimestamp, RpcError> {
        let block_time: Option<i64> = match self.client.request(GET_BLOCK_TIME, (index,)).await {
            Ok(block_time) => block_time,
            Err(e) if is_missing_block(&e) => None,
            Err(e) => return Err(RpcError::request_failed(Chain::Solana, GET_BLOCK_TIME, e)),
        };

        block_time
            .map(UnixTimestamp)
            .ok_or_else(|| RpcError::not_found(Chain::Solana, index))
    }
}
