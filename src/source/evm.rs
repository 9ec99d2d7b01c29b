// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! EVM point source over `eth_*` JSON-RPC

use alloy_primitives::U64;
use alloy_rpc_client::RpcClient;
use async_trait::async_trait;
use serde::Deserialize;

use super::PointSource;
use crate::chain::Chain;
use crate::errors::RpcError;
use crate::types::{Index, UnixTimestamp};

const ETH_BLOCK_NUMBER: &str = "eth_blockNumber";
const ETH_GET_BLOCK_BY_NUMBER: &str = "eth_getBlockByNumber";

/// The only header field blockstamp reads
#[derive(Debug, Deserialize)]
struct BlockTimestamp {
    timestamp: U64,
}

/// Point source for EVM chains
///
/// Blocks are fetched without transaction bodies and only their `timestamp`
/// is decoded, so the source works against any EVM-compatible node.
#[derive(Clone, Debug)]
pub struct EvmPointSource {
    client: RpcClient,
}

impl EvmPointSource {
    /// Creates a source over an EVM JSON-RPC client
    pub fn new(client: RpcClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PointSource for EvmPointSource {
    fn chain(&self) -> Chain {
        Chain::Evm
    }

    async fn latest_index(&self) -> Result<Index, RpcError> {
        let number: U64 = self
            .client
            .request_noparams(ETH_BLOCK_NUMBER)
            .await
            .map_err(|e| RpcError::request_failed(Chain::Evm, ETH_BLOCK_NUMBER, e))?;

        Ok(number.to::<u64>())
    }

    async fn timestamp_at(&self, index: Index) -> Result<UnixTimestamp, RpcError> {
        let tag = format!("{index:#x}");
        let block: Option<BlockTimestamp> = self
            .client
            .request(ETH_GET_BLOCK_BY_NUMBER, (tag, false))
            .await
            .map_err(|e| RpcError::request_failed(Chain::Evm, ETH_GET_BLOCK_BY_NUMBER, e))?;

        let block = block.ok_or_else(|| RpcError::not_found(Chain::Evm, index))?;
        let raw = block.timestamp.to::<u64>();
        UnixTimestamp::try_from(raw).map_err(|_| {
            RpcError::invalid_response(
                Chain::Evm,
                ETH_GET_BLOCK_BY_NUMBER,
                format!("timestamp {raw} exceeds i64"),
            )
        })
    }
}
