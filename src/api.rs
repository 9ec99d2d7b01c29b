// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! HTTP API over the chain resolvers
//!
//! - `GET /api/v1/blocks?timestamps=a,b,c&chain=evm|solana` resolves each
//!   timestamp to its closest block or slot. A failing item is reported as
//!   `null`; the request as a whole still succeeds.
//! - `GET /api/v1/blocks?block=N&chain=evm|solana` returns the timestamp of a
//!   single block or slot. A failure is reported as an error response.
//! - `GET /health` returns `"ok"`.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use futures::future::join_all;
use serde::Deserialize;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::blocks::{ChainResolver, Resolvers};
use crate::chain::Chain;
use crate::errors::ApiError;
use crate::types::{Index, UnixTimestamp};

/// Query parameters for the `/api/v1/blocks` endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct BlocksQuery {
    /// Comma-separated Unix timestamps
    pub timestamps: Option<String>,
    /// A single block number or slot
    #[serde(alias = "blockNumber")]
    pub block: Option<String>,
    /// `evm` (default) or `solana`
    pub chain: Option<String>,
}

impl BlocksQuery {
    fn chain(&self) -> Result<Chain, ApiError> {
        self.chain
            .as_deref()
            .map(str::parse::<Chain>)
            .transpose()
            .map_err(|e| ApiError::bad_input(e.to_string()))
            .map(Option::unwrap_or_default)
    }
}

/// Builds the API router over shared resolvers.
pub fn router(resolvers: Arc<Resolvers>) -> Router {
    Router::new()
        .route("/api/v1/blocks", get(get_blocks))
        .route("/health", get(health_check))
        .with_state(resolvers)
}

/// Starts the API server.
pub async fn serve_api(listener: TcpListener, resolvers: Arc<Resolvers>) -> anyhow::Result<()> {
    let app = router(resolvers);

    let addr = listener.local_addr()?;

    info!(address = ?addr, "Starting server");

    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> Json<&'static str> {
    Json("ok")
}

/// Handler for the `/api/v1/blocks` endpoint.
async fn get_blocks(
    State(resolvers): State<Arc<Resolvers>>,
    Query(params): Query<BlocksQuery>,
) -> Result<Response, ApiError> {
    info!(params = ?params, "Received blocks request");

    let chain = params.chain()?;
    let resolver = resolvers.for_chain(chain);

    let items = params
        .timestamps
        .as_deref()
        .map(batch_items)
        .unwrap_or_default();
    if !items.is_empty() {
        let resolved = resolve_timestamps(resolver, items).await;
        return Ok(Json(resolved).into_response());
    }

    let block = params.block.as_deref().map(str::trim).filter(|raw| !raw.is_empty());
    if let Some(raw) = block {
        let index: i64 = raw
            .parse()
            .map_err(|_| ApiError::bad_input(format!("Invalid {} '{raw}'", chain.index_noun())))?;
        let timestamp = resolver.timestamp_for_index(index).await?;

        let body = BTreeMap::from([(raw.to_string(), timestamp.0)]);
        return Ok(Json(body).into_response());
    }

    Err(ApiError::bad_input(
        "Either 'timestamps' or 'block' query parameter is required",
    ))
}

/// Non-blank items of a comma-separated list, trimmed
///
/// A list with no items (`""`, `",,"`) counts as an absent parameter.
fn batch_items(timestamps: &str) -> Vec<&str> {
    timestamps
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .collect()
}

/// Resolves every item concurrently.
///
/// Keys are the items as given (trimmed); an item that does not parse or does
/// not resolve maps to `None`.
async fn resolve_timestamps(
    resolver: &ChainResolver,
    items: Vec<&str>,
) -> BTreeMap<String, Option<Index>> {
    let results = join_all(items.iter().map(|item| resolve_one(resolver, item))).await;

    items
        .into_iter()
        .map(str::to_string)
        .zip(results)
        .collect()
}

async fn resolve_one(resolver: &ChainResolver, item: &str) -> Option<Index> {
    let target: i64 = match item.parse() {
        Ok(target) => target,
        Err(_) => {
            warn!(item, "Ignoring malformed timestamp");
            return None;
        }
    };

    match resolver.index_for_timestamp(UnixTimestamp(target)).await {
        Ok(index) => Some(index),
        Err(e) => {
            warn!(chain = %resolver.chain(), target, error = %e, "Timestamp resolution failed");
            None
        }
    }
}
