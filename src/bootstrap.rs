// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Service wiring: configuration, RPC clients, resolvers and the HTTP server.

use std::sync::Arc;

use anyhow::Context;
use dotenvy::dotenv;
use tokio::net::TcpListener;
use tracing::info;

use crate::api::serve_api;
use crate::blocks::{ChainResolver, Resolvers};
use crate::chain::Chain;
use crate::config::ServiceConfig;
use crate::source::{connect_http, EvmPointSource, SolanaPointSource};

/// Main entry point for the application.
pub async fn run() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    let config = ServiceConfig::from_env()?;

    let listener = TcpListener::bind(("0.0.0.0", config.port))
        .await
        .with_context(|| format!("Failed to bind port {}", config.port))?;

    let resolvers = build_resolvers(&config)?;

    info!(
        evm_rpc = %config.evm_rpc_url.host_str().unwrap_or_default(),
        solana_rpc = %config.solana_rpc_url.host_str().unwrap_or_default(),
        max_attempts = config.resolver.retry.max_attempts,
        retry_delay_ms = config.resolver.retry.delay.as_millis() as u64,
        "Resolvers ready"
    );

    // Start the API server
    serve_api(listener, Arc::new(resolvers)).await?;

    Ok(())
}

/// Creates one resolver per chain from the service configuration.
pub fn build_resolvers(config: &ServiceConfig) -> anyhow::Result<Resolvers> {
    let evm = EvmPointSource::new(connect_http(
        Chain::Evm,
        config.evm_rpc_url.clone(),
        config.rpc_logging,
    ));
    let solana = SolanaPointSource::new(connect_http(
        Chain::Solana,
        config.solana_rpc_url.clone(),
        config.rpc_logging,
    ));

    Resolvers::new(
        ChainResolver::new(evm, config.resolver),
        ChainResolver::new(solana, config.resolver),
    )
    .context("Resolvers bound to the wrong chains")
}
