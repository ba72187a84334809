//! Retry policy for outbound requests.

use std::time::Duration;

use crate::error::ConnectorError;

/// Default number of attempts, first call included.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 2;

/// Default base delay between attempts.
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(500);

/// Default per-attempt timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// How often and how patiently a request is attempted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of attempts, first call included.
    pub max_attempts: u32,
    /// Delay unit; attempt `n` waits `base_delay * n` before the next try.
    pub base_delay: Duration,
    /// Timeout applied to each attempt that carries none of its own.
    pub timeout: Duration,
}

impl RetryPolicy {
    /// Creates a policy with the given number of attempts.
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay: DEFAULT_BASE_DELAY,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Disables retries.
    pub fn no_retry() -> Self {
        Self::new(1).with_base_delay(Duration::ZERO)
    }

    /// Sets the base delay.
    #[must_use]
    pub fn with_base_delay(mut self, delay: Duration) -> Self {
        self.base_delay = delay;
        self
    }

    /// Sets the per-attempt timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Delay to wait after failed attempt number `attempt` (1-based).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        self.base_delay * attempt
    }

    /// Whether a failure on attempt number `attempt` should be retried.
    pub fn should_retry(&self, error: &ConnectorError, attempt: u32) -> bool {
        attempt < self.max_attempts && error.is_retryable()
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_linear_backoff() {
        let policy = RetryPolicy::default();

        assert_eq!(policy.delay_for_attempt(1), Duration::from_millis(500));
        assert_eq!(policy.delay_for_attempt(2), Duration::from_millis(1000));
        assert_eq!(policy.delay_for_attempt(3), Duration::from_millis(1500));
    }

    #[test]
    fn test_defaults() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 2);
        assert_eq!(policy.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_should_retry_only_retryable_kinds() {
        let policy = RetryPolicy::default();
        let server = ConnectorError::new(ErrorKind::ServerError, "500");
        let token = ConnectorError::new(ErrorKind::InvalidToken, "401");

        assert!(policy.should_retry(&server, 1));
        assert!(!policy.should_retry(&server, 2));
        assert!(!policy.should_retry(&token, 1));
    }

    #[test]
    fn test_no_retry() {
        let policy = RetryPolicy::no_retry();
        let timeout = ConnectorError::new(ErrorKind::Timeout, "slow");
        assert!(!policy.should_retry(&timeout, 1));
        assert_eq!(policy.delay_for_attempt(1), Duration::ZERO);
    }

    #[test]
    fn test_zero_attempts_clamped() {
        assert_eq!(RetryPolicy::new(0).max_attempts, 1);
    }
}
