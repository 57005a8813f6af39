//! Retry policy - Exponential backoff with bounded jitter.
//!
//! One policy instance is injected into the gateway so every call path
//! shares identical resilience semantics. The jitter bound is the base
//! delay, which keeps the inter-attempt schedule monotonically
//! non-decreasing while still spreading concurrent retries. The maximum
//! delay is a hard cap, jitter included.

use rand::Rng;
use std::time::Duration;

/// Backoff and attempt budget for transient provider failures.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, the first one included.
    max_attempts: u32,
    /// Delay before the second attempt; doubles each attempt after.
    base_delay: Duration,
    /// Hard upper bound on any single delay, jitter included.
    max_delay: Duration,
    /// Whether to add random jitter in `[0, base_delay)`.
    jitter: bool,
}

impl RetryPolicy {
    /// Creates a policy with the given attempt budget and delays.
    pub fn new(max_attempts: u32, base_delay: Duration, max_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
            max_delay,
            jitter: true,
        }
    }

    /// Enables or disables jitter (tests disable it for exact schedules).
    pub fn with_jitter(mut self, jitter: bool) -> Self {
        self.jitter = jitter;
        self
    }

    /// Total attempts allowed, the initial one included.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// True when `attempt` (1-based) left a retry in the budget.
    pub fn allows_retry_after(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }

    /// Delay to wait before the given attempt (2-based; the first attempt
    /// never waits).
    pub fn delay_before(&self, attempt: u32) -> Duration {
        if attempt <= 1 {
            return Duration::ZERO;
        }
        let exponent = (attempt - 2).min(31);
        let scaled = self
            .base_delay
            .saturating_mul(1u32 << exponent)
            .min(self.max_delay);
        if !self.jitter || self.base_delay.is_zero() {
            return scaled;
        }
        let jitter_ms = rand::thread_rng().gen_range(0..self.base_delay.as_millis().max(1) as u64);
        (scaled + Duration::from_millis(jitter_ms)).min(self.max_delay)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_millis(500), Duration::from_secs(8))
    }
}
