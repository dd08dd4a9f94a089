//! Tuning knobs for the executors.
//!
//! Both configs are checked before any work runs: a zero retry count, delay
//! or batch size is an error, never silently replaced by the default.

use std::num::NonZeroUsize;
use std::time::Duration;

use crate::ConfigError;

// ---------------------------------------------------------------------------
// Retry
// ---------------------------------------------------------------------------

/// Retry policy for [`crate::RetryingExecutor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryConfig {
    /// Retries after the first attempt; a run makes at most `max_retries + 1`
    /// attempts.
    pub max_retries: u32,
    /// Base delay for linear back-off: retry *n* waits `n * retry_base_delay`.
    pub retry_base_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            retry_base_delay: Duration::from_millis(100),
        }
    }
}

impl RetryConfig {
    /// Build and validate a config from raw integers.
    pub fn new(max_retries: u32, base_delay_ms: u64) -> Result<Self, ConfigError> {
        let config = Self {
            max_retries,
            retry_base_delay: Duration::from_millis(base_delay_ms),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_retries == 0 {
            return Err(ConfigError::MaxRetries(self.max_retries));
        }
        if self.retry_base_delay.as_millis() == 0 {
            return Err(ConfigError::RetryBaseDelay(self.retry_base_delay.as_millis()));
        }
        Ok(())
    }

    /// Delay to wait before retry number `retry` (1-based).
    pub fn delay_for_retry(&self, retry: u32) -> Duration {
        self.retry_base_delay.saturating_mul(retry)
    }
}

// ---------------------------------------------------------------------------
// Batch
// ---------------------------------------------------------------------------

/// Chunk size for [`crate::run_batched`]; also the peak number of items in
/// flight at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchConfig {
    batch_size: NonZeroUsize,
}

impl BatchConfig {
    pub const DEFAULT_BATCH_SIZE: usize = 10;

    const DEFAULT: NonZeroUsize = match NonZeroUsize::new(Self::DEFAULT_BATCH_SIZE) {
        Some(n) => n,
        None => unreachable!(),
    };

    pub fn new(batch_size: usize) -> Result<Self, ConfigError> {
        NonZeroUsize::new(batch_size)
            .map(|batch_size| Self { batch_size })
            .ok_or(ConfigError::BatchSize(batch_size))
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size.get()
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: Self::DEFAULT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let retry = RetryConfig::default();
        assert_eq!(retry.max_retries, 3);
        assert_eq!(retry.retry_base_delay, Duration::from_millis(100));
        assert_eq!(BatchConfig::default().batch_size(), 10);
    }

    #[test]
    fn backoff_is_linear() {
        let retry = RetryConfig::default();
        assert_eq!(retry.delay_for_retry(1), Duration::from_millis(100));
        assert_eq!(retry.delay_for_retry(2), Duration::from_millis(200));
        assert_eq!(retry.delay_for_retry(3), Duration::from_millis(300));
    }

    #[test]
    fn zero_values_are_rejected() {
        assert_eq!(RetryConfig::new(0, 100), Err(ConfigError::MaxRetries(0)));
        assert_eq!(RetryConfig::new(3, 0), Err(ConfigError::RetryBaseDelay(0)));
        assert_eq!(BatchConfig::new(0), Err(ConfigError::BatchSize(0)));
    }

    #[test]
    fn hand_built_config_is_still_validated() {
        let config = RetryConfig { max_retries: 0, ..RetryConfig::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn valid_values_are_kept() {
        let retry = RetryConfig::new(5, 250).expect("valid");
        assert_eq!(retry.max_retries, 5);
        assert_eq!(retry.retry_base_delay, Duration::from_millis(250));
        assert_eq!(BatchConfig::new(1).expect("valid").batch_size(), 1);
    }
}
