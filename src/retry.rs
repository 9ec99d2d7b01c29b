// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Bounded retry with a fixed delay between attempts.
//!
//! Remote point lookups go through [`retry`] so that a flaky RPC endpoint does
//! not abort a whole binary search. The delay is constant: attempt `n + 1`
//! starts `delay` after attempt `n` failed, with no jitter and no exponential
//! growth.
//!
//! # Example
//!
//! ```rust,ignore
//! use blockstamp::retry::{retry, RetryPolicy};
//!
//! let latest = retry(&RetryPolicy::default(), || source.latest_index()).await?;
//! ```

use std::fmt;
use std::future::Future;
use std::time::Duration;

use tracing::{debug, warn};

use crate::config::constants::{DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_DELAY_MS};

/// Classifies errors as worth retrying or not.
pub trait Retryable {
    /// Returns `true` for transient errors that may succeed on a later attempt
    fn is_retryable(&self) -> bool;
}

/// How many times to attempt an operation and how long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first one
    pub max_attempts: u32,
    /// Fixed delay between a failed attempt and the next one
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            delay: Duration::from_millis(DEFAULT_RETRY_DELAY_MS),
        }
    }
}

impl RetryPolicy {
    /// Creates a policy with the given attempt budget and delay
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
        }
    }

    /// A policy that makes exactly one attempt
    pub fn no_retry() -> Self {
        Self::new(1, Duration::ZERO)
    }

    /// Attempt budget, never less than one
    fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }
}

/// Why a retried operation ultimately failed.
#[derive(Debug, thiserror::Error)]
pub enum RetryError<E>
where
    E: std::error::Error + 'static,
{
    /// Every attempt failed with a retryable error.
    #[error("Max retries exceeded after {attempts} attempts: {last}")]
    Exhausted {
        /// Number of attempts made
        attempts: u32,
        /// The error from the final attempt
        #[source]
        last: E,
    },

    /// An attempt failed with an error that is not worth retrying.
    #[error(transparent)]
    Aborted(E),
}

impl<E> RetryError<E>
where
    E: std::error::Error + 'static,
{
    /// Returns the underlying error of the last attempt
    pub fn into_inner(self) -> E {
        match self {
            RetryError::Exhausted { last, .. } => last,
            RetryError::Aborted(error) => error,
        }
    }
}

/// Runs `operation` until it succeeds, fails with a non-retryable error, or
/// the policy's attempt budget is spent.
///
/// A successful attempt returns immediately without waiting. After a
/// retryable failure with attempts remaining, sleeps `policy.delay` before
/// the next attempt, so the worst case waits `(max_attempts - 1) * delay`.
pub async fn retry<T, E, F, Fut>(policy: &RetryPolicy, mut operation: F) -> Result<T, RetryError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Retryable + std::error::Error + fmt::Display + 'static,
{
    let max_attempts = policy.attempts();
    let mut attempt = 1u32;

    loop {
        match operation().await {
            Ok(value) => {
                if attempt > 1 {
                    debug!(attempt, "Operation succeeded after retry");
                }
                return Ok(value);
            }
            Err(error) => {
                if !error.is_retryable() {
                    debug!(error = %error, "Non-retryable error, not retrying");
                    return Err(RetryError::Aborted(error));
                }

                if attempt >= max_attempts {
                    warn!(error = %error, attempts = attempt, "Max retries exceeded");
                    return Err(RetryError::Exhausted {
                        attempts: attempt,
                        last: error,
                    });
                }

                warn!(
                    error = %error,
                    attempt,
                    max_attempts,
                    delay_ms = policy.delay.as_millis() as u64,
                    "Retryable error, waiting before next attempt"
                );
                tokio::time::sleep(policy.delay).await;
                attempt += 1;
            }
        }
    }
}
