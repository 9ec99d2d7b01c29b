// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Supported chains and their resolution traits.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The chains blockstamp can resolve against
///
/// EVM chains produce blocks whose timestamps increase strictly with the block
/// number. Solana slots are only approximately time-linear: skipped slots and
/// per-leader clock drift introduce local noise, so resolution on Solana runs a
/// bounded refinement pass after the binary search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chain {
    /// Any EVM chain reachable through `eth_*` JSON-RPC methods
    #[default]
    Evm,
    /// Solana, indexed by slot
    Solana,
}

impl Chain {
    /// All supported chains
    pub const ALL: [Chain; 2] = [Chain::Evm, Chain::Solana];

    /// Returns true when index → timestamp is effectively strictly increasing
    pub fn is_monotone(&self) -> bool {
        matches!(self, Self::Evm)
    }

    /// Lowercase noun for an index on this chain ("block" or "slot")
    pub fn index_noun(&self) -> &'static str {
        match self {
            Self::Evm => "block",
            Self::Solana => "slot",
        }
    }

    /// Capitalized noun for an index on this chain ("Block" or "Slot")
    pub fn index_label(&self) -> &'static str {
        match self {
            Self::Evm => "Block",
            Self::Solana => "Slot",
        }
    }

    /// Lowercase name used in query strings and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Evm => "evm",
            Self::Solana => "solana",
        }
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown chain name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown chain '{0}' (expected 'evm' or 'solana')")]
pub struct ParseChainError(pub String);

impl FromStr for Chain {
    type Err = ParseChainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "evm" => Ok(Self::Evm),
            "solana" => Ok(Self::Solana),
            _ => Err(ParseChainError(s.to_string())),
        }
    }
}
