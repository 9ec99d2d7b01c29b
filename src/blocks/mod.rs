// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Timestamp ↔ block/slot resolution.
//!
//! This module provides:
//! - A per-chain point cache for index → timestamp lookups
//! - Binary search and local refinement over index space
//! - The per-chain resolution facade and the resolver registry

pub mod cache;
pub mod resolver;
pub mod search;

// Re-export public API
pub use cache::{CacheStats, PointCache};
pub use resolver::{ChainResolver, Resolvers};
pub use search::{closest_index, refine, Closest, SearchWindow};
