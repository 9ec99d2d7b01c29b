// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Test helpers for blockstamp integration tests
//!
//! Provides a scripted point source so resolution can be tested without real
//! RPC endpoints.

#![allow(dead_code)]

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use alloy_transport::TransportErrorKind;
use async_trait::async_trait;
use blockstamp::{
    Chain, Index, PointSource, ResolverConfig, ResolverConfigBuilder, RpcError, UnixTimestamp,
};

/// Number of remote calls a [`MockPointSource`] has served
#[derive(Debug, Default)]
pub struct CallCounts {
    points: AtomicU32,
    latest: AtomicU32,
}

impl CallCounts {
    pub fn points(&self) -> u32 {
        self.points.load(Ordering::SeqCst)
    }

    pub fn latest(&self) -> u32 {
        self.latest.load(Ordering::SeqCst)
    }
}

/// Mock PointSource backed by a fixed timeline
///
/// Index `i` has timestamp `timestamps[i]`. Indices past the end of the
/// timeline, and indices marked as skipped, are reported as `NotFound`.
///
/// # Example
///
/// ```rust,ignore
/// let source = MockPointSource::new(Chain::Solana, vec![1_000, 1_010, 1_020])
///     .with_skipped(&[1])
///     .with_transient_failures(2);
/// let calls = source.calls();
/// let resolver = ChainResolver::new(source, fast_config());
/// ```
pub struct MockPointSource {
    chain: Chain,
    timestamps: Vec<Option<i64>>,
    latest: Option<Index>,
    transient_failures: AtomicU32,
    calls: Arc<CallCounts>,
}

impl MockPointSource {
    pub fn new(chain: Chain, timestamps: Vec<i64>) -> Self {
        Self {
            chain,
            timestamps: timestamps.into_iter().map(Some).collect(),
            latest: None,
            transient_failures: AtomicU32::new(0),
            calls: Arc::new(CallCounts::default()),
        }
    }

    /// Timeline `start, start + step, ...` with `len` entries
    pub fn linear(chain: Chain, start: i64, step: i64, len: usize) -> Self {
        let timestamps = (0..len as i64).map(|i| start + i * step).collect();
        Self::new(chain, timestamps)
    }

    /// Mark indices as having no block
    pub fn with_skipped(mut self, indices: &[usize]) -> Self {
        for &index in indices {
            if let Some(slot) = self.timestamps.get_mut(index) {
                *slot = None;
            }
        }
        self
    }

    /// Report `latest` as the chain head instead of the end of the timeline
    pub fn with_latest(mut self, latest: Index) -> Self {
        self.latest = Some(latest);
        self
    }

    /// Fail the next `count` point lookups with a retryable transport error
    pub fn with_transient_failures(self, count: u32) -> Self {
        self.transient_failures.store(count, Ordering::SeqCst);
        self
    }

    /// Shared handle on the call counters
    pub fn calls(&self) -> Arc<CallCounts> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl PointSource for MockPointSource {
    fn chain(&self) -> Chain {
        self.chain
    }

    async fn latest_index(&self) -> Result<Index, RpcError> {
        self.calls.latest.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .latest
            .unwrap_or_else(|| self.timestamps.len().saturating_sub(1) as Index))
    }

    async fn timestamp_at(&self, index: Index) -> Result<UnixTimestamp, RpcError> {
        self.calls.points.fetch_add(1, Ordering::SeqCst);

        let failing = self
            .transient_failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            return Err(RpcError::request_failed(
                self.chain,
                "timestamp_at",
                TransportErrorKind::custom_str("connection reset by peer"),
            ));
        }

        self.timestamps
            .get(index as usize)
            .copied()
            .flatten()
            .map(UnixTimestamp)
            .ok_or_else(|| RpcError::not_found(self.chain, index))
    }
}

/// Default resolver configuration without delays between attempts
pub fn fast_config() -> ResolverConfig {
    ResolverConfigBuilder::new()
        .retry_delay(Duration::ZERO)
        .build()
}
