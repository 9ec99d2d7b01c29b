// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for the blockstamp library.
//!
//! Errors are layered the same way the resolution pipeline is:
//!
//! - [`RpcError`] - a single remote call failed, or the node has no record for
//!   the requested index
//! - [`ResolveError`] - a resolution was aborted (retries exhausted, missing
//!   record, index out of range)
//! - [`ApiError`] - what the HTTP boundary reports (bad input, or a wrapped
//!   [`ResolveError`])
//!
//! Each layer converts into the next via `From`, so `?` propagates naturally.
//!
//! # Examples
//!
//! ```rust,ignore
//! use blockstamp::{Chain, ResolveError};
//!
//! match resolver.timestamp_for_index(200_000).await {
//!     Ok(ts) => println!("slot time: {ts}"),
//!     Err(ResolveError::OutOfRange { requested, latest, .. }) => {
//!         eprintln!("slot {requested} not produced yet (latest {latest})");
//!     }
//!     Err(ResolveError::MaxRetriesExceeded { attempts, source }) => {
//!         eprintln!("RPC unavailable after {attempts} attempts: {source}");
//!     }
//!     Err(e) => eprintln!("Other error: {e}"),
//! }
//! ```

mod api;
mod resolve;
mod rpc;

pub use api::ApiError;
pub use resolve::ResolveError;
pub use rpc::RpcError;
