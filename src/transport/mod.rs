// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Transport layer utilities for the JSON-RPC clients.
//!
//! Retries wrap whole point lookups (see [`crate::retry`]), not individual
//! transport calls.

mod logging;

pub use logging::{LoggingLayer, LoggingService};
