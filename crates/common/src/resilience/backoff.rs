//! Backoff strategies for retry and polling loops.

use std::time::Duration;

/// Backoff strategy for calculating retry delays
#[derive(Debug, Clone, PartialEq)]
pub enum BackoffStrategy {
    /// Fixed delay between retries
    Fixed(Duration),
    /// Exponential backoff: `initial_delay * base^attempt`, capped at
    /// `max_delay`
    Exponential { initial_delay: Duration, base: f64, max_delay: Duration },
}

impl BackoffStrategy {
    /// Doubling backoff starting at `initial_delay`.
    #[must_use]
    pub fn doubling(initial_delay: Duration, max_delay: Duration) -> Self {
        Self::Exponential { initial_delay, base: 2.0, max_delay }
    }

    /// Delay before retry number `attempt` (0-based).
    #[must_use]
    pub fn calculate_delay(&self, attempt: u32) -> Duration {
        match self {
            Self::Fixed(delay) => *delay,
            Self::Exponential { initial_delay, base, max_delay } => {
                let exponent = i32::try_from(attempt).unwrap_or(i32::MAX);
                let delay = initial_delay.as_secs_f64() * base.powi(exponent);
                if !delay.is_finite() || delay >= max_delay.as_secs_f64() {
                    *max_delay
                } else {
                    Duration::from_secs_f64(delay.max(0.0))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doubling_delays() {
        let backoff = BackoffStrategy::doubling(Duration::from_secs(1), Duration::from_secs(4));
        assert_eq!(backoff.calculate_delay(0), Duration::from_secs(1));
        assert_eq!(backoff.calculate_delay(1), Duration::from_secs(2));
        assert_eq!(backoff.calculate_delay(2), Duration::from_secs(4));
        assert_eq!(backoff.calculate_delay(3), Duration::from_secs(4));
        assert_eq!(backoff.calculate_delay(u32::MAX), Duration::from_secs(4));
    }

    #[test]
    fn fixed_is_constant() {
        let backoff = BackoffStrategy::Fixed(Duration::from_millis(250));
        assert_eq!(backoff.calculate_delay(0), backoff.calculate_delay(10));
    }
}
