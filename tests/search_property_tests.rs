// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Property-based tests for index search
//!
//! These tests use proptest to validate the search invariants across
//! arbitrary synthetic timelines.

use std::future::{ready, Ready};

use blockstamp::blocks::{closest_index, refine, Closest};
use blockstamp::{Chain, Index, RefineWindow, ResolveError, UnixTimestamp};
use proptest::prelude::*;

fn lookup(
    timestamps: &[i64],
) -> impl FnMut(Index) -> Ready<Result<UnixTimestamp, ResolveError>> + '_ {
    move |index| {
        ready(
            timestamps
                .get(index as usize)
                .map(|&ts| UnixTimestamp(ts))
                .ok_or(ResolveError::NotFound {
                    chain: Chain::Solana,
                    index,
                }),
        )
    }
}

fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
        .block_on(future)
}

// Strictly increasing timeline built from positive gaps
fn arb_monotone_timeline() -> impl Strategy<Value = Vec<i64>> {
    (0i64..2_000_000_000, prop::collection::vec(1i64..600, 1..500)).prop_map(|(start, gaps)| {
        gaps.iter()
            .scan(start, |ts, gap| {
                let current = *ts;
                *ts += gap;
                Some(current)
            })
            .collect()
    })
}

// Increasing trend with bounded per-index noise
fn arb_noisy_timeline() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(-300i64..300, 1..300).prop_map(|noise| {
        noise
            .iter()
            .enumerate()
            .map(|(i, n)| 1_000_000 + i as i64 * 400 + n)
            .collect()
    })
}

fn min_difference(timestamps: &[i64], target: i64) -> u64 {
    timestamps
        .iter()
        .map(|&ts| ts.abs_diff(target))
        .min()
        .unwrap()
}

proptest! {
    /// Property: on a monotone timeline the search finds a globally closest index
    #[test]
    fn prop_binary_search_is_optimal_on_monotone_input(
        timestamps in arb_monotone_timeline(),
        offset in -10_000i64..10_000,
        pick in any::<prop::sample::Index>(),
    ) {
        let target = timestamps[pick.index(timestamps.len())] + offset;
        let latest = (timestamps.len() - 1) as Index;

        let closest = block_on(closest_index(UnixTimestamp(target), latest, lookup(&timestamps)))
            .unwrap();

        prop_assert!(closest.index <= latest);
        prop_assert_eq!(
            closest.difference,
            timestamps[closest.index as usize].abs_diff(target)
        );
        prop_assert_eq!(closest.difference, min_difference(&timestamps, target));
    }

    /// Property: refinement never returns an index further from the target than its seed
    #[test]
    fn prop_refine_never_worse_than_seed(
        timestamps in arb_noisy_timeline(),
        pick in any::<prop::sample::Index>(),
        target_offset in -2_000i64..2_000,
        max_offset in 0u64..150,
        threshold_secs in 0u64..120,
    ) {
        let seed_index = pick.index(timestamps.len());
        let target = timestamps[seed_index] + target_offset;
        let seed = Closest {
            index: seed_index as Index,
            difference: timestamps[seed_index].abs_diff(target),
        };
        let window = RefineWindow { max_offset, threshold_secs };

        let best = block_on(refine(seed, UnixTimestamp(target), &window, lookup(&timestamps)));

        prop_assert!(best.difference <= seed.difference);
        prop_assert_eq!(
            best.difference,
            timestamps[best.index as usize].abs_diff(target)
        );
        if best.index != seed.index {
            prop_assert!(best.index.abs_diff(seed.index) <= max_offset);
        }
    }
}
