// Copyright 2025 The Tari Project
// SPDX-License-Identifier: BSD-3-Clause

use std::time::Duration;

/// Default number of retries after a `503 Service Unavailable` reply.
pub const DEFAULT_MAX_RETRIES: u32 = 0;

/// Default wait between two attempts.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::ZERO;

/// Bounded, fixed-delay retry policy for transient server overload.
///
/// Only `503 Service Unavailable` replies consume the retry budget; a call
/// makes at most `max_retries + 1` requests.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use monero_light::http::RetryPolicy;
///
/// // Up to 3 attempts in total, half a second apart
/// let policy = RetryPolicy::new(2, Duration::from_millis(500));
/// assert_eq!(policy.max_attempts(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of retries after the first attempt.
    pub max_retries: u32,
    /// Time to wait before every retry.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            delay: DEFAULT_RETRY_DELAY,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, delay: Duration) -> Self {
        Self { max_retries, delay }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Whether another attempt may follow the ones already recorded in `state`.
    pub fn allows_retry(&self, state: &RetryState) -> bool {
        state.retries_used() < self.max_retries
    }
}

/// Per-call attempt counter. Never shared between calls.
#[derive(Debug, Default)]
pub struct RetryState {
    attempts_made: u32,
}

impl RetryState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a request about to be sent and returns its 1-based number.
    pub fn begin_attempt(&mut self) -> u32 {
        self.attempts_made += 1;
        self.attempts_made
    }

    pub fn attempts_made(&self) -> u32 {
        self.attempts_made
    }

    pub fn retries_used(&self) -> u32 {
        self.attempts_made.saturating_sub(1)
    }
}
