//! Retry policy for page fetches

use std::time::Duration;

/// Bounded retry with exponential backoff
///
/// The wait after the `n`-th failed attempt is `multiplier * 2^(n-1)`,
/// clamped to `[min_backoff, max_backoff]`. With the defaults this yields
/// 4s, 4s, 4s, 8s, 10s, 10s, ...
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts per URL, including the first one
    pub max_attempts: u32,

    /// Base unit doubled on every failed attempt
    pub multiplier: Duration,

    /// Lower bound of a single wait
    pub min_backoff: Duration,

    /// Upper bound of a single wait
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            multiplier: Duration::from_secs(1),
            min_backoff: Duration::from_secs(4),
            max_backoff: Duration::from_secs(10),
        }
    }
}

impl RetryPolicy {
    /// A policy that never waits between attempts
    pub fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            multiplier: Duration::ZERO,
            min_backoff: Duration::ZERO,
            max_backoff: Duration::ZERO,
        }
    }

    /// Attempts allowed per URL; never less than one
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// Returns how long to wait after `failed_attempts` consecutive failures
    pub fn backoff(&self, failed_attempts: u32) -> Duration {
        let exponent = failed_attempts.saturating_sub(1).min(31);
        let raw = self.multiplier.saturating_mul(1u32 << exponent);

        raw.max(self.min_backoff).min(self.max_backoff)
    }

    /// Returns true if another attempt is allowed after `failed_attempts`
    pub fn should_retry(&self, failed_attempts: u32) -> bool {
        failed_attempts < self.attempts()
    }
}
