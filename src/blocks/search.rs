// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Closest-index search over a chain's index → timestamp function
//!
//! Both searches are written against a plain async lookup `index ->
//! timestamp` so they can be exercised with synthetic timelines. In the
//! service the lookup is the chain resolver's cached, retried point query.
//!
//! - [`closest_index`] binary-searches `[0, latest]` assuming timestamps grow
//!   with the index.
//! - [`refine`] walks outward from a seed index to correct for local noise on
//!   chains where that assumption only holds approximately (Solana).

use std::future::Future;

use tracing::debug;

use crate::config::RefineWindow;
use crate::errors::ResolveError;
use crate::types::{Index, UnixTimestamp};

/// Best candidate seen so far
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Closest {
    /// Candidate index
    pub index: Index,
    /// `|timestamp(index) - target|` in seconds
    pub difference: u64,
}

/// State of a binary search over `[start, end]`
///
/// Tracks the closest candidate across every probe of the search, not only
/// the last comparison. A candidate only replaces the current one when it is
/// strictly closer, so the first index to reach a given difference is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchWindow {
    start: Index,
    end: Index,
    exhausted: bool,
    closest: Option<Closest>,
}

impl SearchWindow {
    /// Creates a window covering `[0, latest]`
    pub fn new(latest: Index) -> Self {
        Self {
            start: 0,
            end: latest,
            exhausted: false,
            closest: None,
        }
    }

    /// Midpoint to probe next, or `None` once the window is empty
    pub fn midpoint(&self) -> Option<Index> {
        if self.exhausted || self.start > self.end {
            return None;
        }
        Some(self.start + (self.end - self.start) / 2)
    }

    /// Records a probe of `index` and returns its difference to the target
    pub fn observe(&mut self, index: Index, timestamp: UnixTimestamp, target: UnixTimestamp) -> u64 {
        let difference = timestamp.abs_diff(target);
        if self.closest.is_none_or(|closest| difference < closest.difference) {
            self.closest = Some(Closest { index, difference });
        }
        difference
    }

    /// Continue in `(mid, end]`
    pub fn go_right(&mut self, mid: Index) {
        match mid.checked_add(1) {
            Some(next) => self.start = next,
            None => self.exhausted = true,
        }
    }

    /// Continue in `[start, mid)`
    pub fn go_left(&mut self, mid: Index) {
        match mid.checked_sub(1) {
            Some(prev) => self.end = prev,
            None => self.exhausted = true,
        }
    }

    /// The closest candidate observed so far
    pub fn closest(&self) -> Option<Closest> {
        self.closest
    }
}

/// Binary search for the index whose timestamp is closest to `target`
///
/// # Algorithm
///
/// - **Search space**: `[0, latest]`
/// - **Exact hit**: returns immediately
/// - **Otherwise**: returns the closest index seen across all probes; targets
///   before the first or after the last index resolve to the nearest boundary
///
/// # Complexity
///
/// - RPC calls: O(log n), one lookup per iteration (fewer with a warm cache)
pub async fn closest_index<F, Fut>(
    target: UnixTimestamp,
    latest: Index,
    mut timestamp_at: F,
) -> Result<Closest, ResolveError>
where
    F: FnMut(Index) -> Fut,
    Fut: Future<Output = Result<UnixTimestamp, ResolveError>>,
{
    let mut window = SearchWindow::new(latest);

    while let Some(mid) = window.midpoint() {
        let ts = timestamp_at(mid).await?;
        let difference = window.observe(mid, ts, target);

        if difference == 0 {
            debug!(target_ts = %target, index = mid, "Exact timestamp match");
            return Ok(Closest {
                index: mid,
                difference,
            });
        }

        if ts < target {
            window.go_right(mid);
        } else {
            window.go_left(mid);
        }
    }

    // The window starts non-empty, so at least one probe was recorded
    let closest = window.closest().unwrap_or(Closest {
        index: 0,
        difference: u64::MAX,
    });
    debug!(
        target_ts = %target,
        index = closest.index,
        difference = closest.difference,
        "Binary search finished"
    );
    Ok(closest)
}

/// Walks outward from `seed` looking for a strictly closer index
///
/// Probes `seed + offset` then `seed - offset` for `offset` in
/// `1..=window.max_offset`, stopping as soon as the best difference is within
/// `window.threshold_secs`. A probe that fails (skipped slot, index beyond the
/// chain head, exhausted retries) is skipped. The result is never further from
/// the target than the seed.
pub async fn refine<F, Fut>(
    seed: Closest,
    target: UnixTimestamp,
    window: &RefineWindow,
    mut timestamp_at: F,
) -> Closest
where
    F: FnMut(Index) -> Fut,
    Fut: Future<Output = Result<UnixTimestamp, ResolveError>>,
{
    let mut best = seed;

    for offset in 1..=window.max_offset {
        if best.difference <= window.threshold_secs {
            break;
        }

        let candidates = [seed.index.checked_add(offset), seed.index.checked_sub(offset)];
        for index in candidates.into_iter().flatten() {
            match timestamp_at(index).await {
                Ok(ts) => {
                    let difference = ts.abs_diff(target);
                    if difference < best.difference {
                        best = Closest { index, difference };
                    }
                }
                Err(e) => debug!(index, error = %e, "Skipping refinement probe"),
            }
        }
    }

    debug!(
        seed = seed.index,
        seed_difference = seed.difference,
        index = best.index,
        difference = best.difference,
        "Refinement finished"
    );
    best
}
