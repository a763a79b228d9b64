//! Bounded polling configuration.

use std::time::Duration;

use thiserror::Error;

use super::backoff::BackoffStrategy;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PollConfigError {
    #[error("invalid poll configuration: {0}")]
    Invalid(&'static str),
}

/// Limits for a poll-until-ready loop.
///
/// Every loop has a deadline; `max_attempts` optionally caps the number of
/// tries before the deadline is reached.
#[derive(Debug, Clone, PartialEq)]
pub struct PollConfig {
    pub backoff: BackoffStrategy,
    pub max_attempts: Option<u32>,
    pub timeout: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            backoff: BackoffStrategy::Exponential {
                initial_delay: Duration::from_secs(5),
                base: 1.5,
                max_delay: Duration::from_secs(30),
            },
            max_attempts: None,
            timeout: Duration::from_secs(300),
        }
    }
}

impl PollConfig {
    pub fn builder() -> PollConfigBuilder {
        PollConfigBuilder::default()
    }

    /// # Errors
    /// Returns `PollConfigError::Invalid` for a zero timeout, zero attempt
    /// cap, or non-positive exponential base.
    pub fn validate(&self) -> Result<(), PollConfigError> {
        if self.timeout.is_zero() {
            return Err(PollConfigError::Invalid("timeout must be greater than 0"));
        }
        if self.max_attempts == Some(0) {
            return Err(PollConfigError::Invalid("max_attempts must be greater than 0"));
        }
        if let BackoffStrategy::Exponential { base, .. } = &self.backoff {
            if *base <= 0.0 {
                return Err(PollConfigError::Invalid("exponential base must be greater than 0"));
            }
        }
        Ok(())
    }

    /// Delay to wait after failed attempt number `attempt` (1-based).
    #[must_use]
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.backoff.calculate_delay(attempt.saturating_sub(1))
    }

    #[must_use]
    pub fn attempts_exhausted(&self, attempts: u32) -> bool {
        self.max_attempts.is_some_and(|max| attempts >= max)
    }
}

/// Builder for [`PollConfig`] with fluent API
#[derive(Debug, Default)]
pub struct PollConfigBuilder {
    config: PollConfig,
}

impl PollConfigBuilder {
    #[must_use]
    pub fn fixed_interval(mut self, delay: Duration) -> Self {
        self.config.backoff = BackoffStrategy::Fixed(delay);
        self
    }

    #[must_use]
    pub fn exponential_backoff(mut self, initial_delay: Duration, base: f64, max_delay: Duration) -> Self {
        self.config.backoff = BackoffStrategy::Exponential { initial_delay, base, max_delay };
        self
    }

    #[must_use]
    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.config.max_attempts = Some(attempts);
        self
    }

    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// # Errors
    /// See [`PollConfig::validate`].
    pub fn build(self) -> Result<PollConfig, PollConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
