// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Shared value types

use serde::{Deserialize, Serialize};

/// Position of a block (EVM) or slot (Solana) in its chain
pub type Index = u64;

/// Unix timestamp in seconds (always UTC)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UnixTimestamp(pub i64);

impl UnixTimestamp {
    /// Absolute distance in seconds to another timestamp
    pub fn abs_diff(&self, other: UnixTimestamp) -> u64 {
        self.0.abs_diff(other.0)
    }
}

impl std::fmt::Display for UnixTimestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for UnixTimestamp {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl TryFrom<u64> for UnixTimestamp {
    type Error = std::num::TryFromIntError;

    /// Fails for values above `i64::MAX` instead of wrapping
    fn try_from(value: u64) -> Result<Self, Self::Error> {
        i64::try_from(value).map(Self)
    }
}
