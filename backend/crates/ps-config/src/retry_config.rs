use crate::ConfigErrorResult;
use crate::error::ensure_range;

use serde::Deserialize;

/// Attempts per AI call, counting the first one. 0 is treated as 1.
pub const MAX_ATTEMPTS_RANGE: (u32, u32) = (0, 10);
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

pub const INITIAL_DELAY_MS_RANGE: (u64, u64) = (0, 60_000);
pub const DEFAULT_INITIAL_DELAY_MS: u64 = 1000;

pub const MAX_DELAY_SECS_RANGE: (u64, u64) = (1, 300);
pub const DEFAULT_MAX_DELAY_SECS: u64 = 30;

pub const BACKOFF_MULTIPLIER_RANGE: (f64, f64) = (1.0, 10.0);
pub const DEFAULT_BACKOFF_MULTIPLIER: f64 = 2.0;

/// How the AI backend is retried after a retryable failure.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Off means one attempt per call regardless of `max_attempts`
    pub enabled: bool,
    pub max_attempts: u32,
    pub initial_delay_ms: u64,
    /// Upper bound for a single backoff sleep
    pub max_delay_secs: u64,
    pub backoff_multiplier: f64,
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            initial_delay_ms: DEFAULT_INITIAL_DELAY_MS,
            max_delay_secs: DEFAULT_MAX_DELAY_SECS,
            backoff_multiplier: DEFAULT_BACKOFF_MULTIPLIER,
            jitter: true,
        }
    }
}

impl RetryConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        let (min, max) = MAX_ATTEMPTS_RANGE;
        ensure_range("retry.max_attempts", self.max_attempts, min..=max)?;

        let (min, max) = INITIAL_DELAY_MS_RANGE;
        ensure_range("retry.initial_delay_ms", self.initial_delay_ms, min..=max)?;

        let (min, max) = MAX_DELAY_SECS_RANGE;
        ensure_range("retry.max_delay_secs", self.max_delay_secs, min..=max)?;

        let (min, max) = BACKOFF_MULTIPLIER_RANGE;
        ensure_range("retry.backoff_multiplier", self.backoff_multiplier, min..=max)
    }

    /// Attempts actually made per call.
    pub fn effective_attempts(&self) -> u32 {
        if self.enabled {
            self.max_attempts.max(1)
        } else {
            1
        }
    }
}
