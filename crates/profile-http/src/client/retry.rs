//! Backoff policy for idempotent profile reads.
//!
//! Mutations are never replayed: a POST that timed out may still have
//! created a row, and the section controller refetches on its own.

use crate::client::utils::is_retryable_status;
use crate::error::ApiError;
use std::time::Duration;

/// How many times, and how patiently, a read is re-sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryConfig {
    /// Re-sends after the first attempt. Zero disables retrying.
    pub max_retries: u32,
    /// Delay before the first re-send; doubles on each further one.
    pub base_delay: Duration,
    /// Upper bound for any single delay, `Retry-After` included.
    pub max_delay: Duration,
    /// Honour a numeric `Retry-After` header on 429/503.
    pub respect_retry_after: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(8),
            respect_retry_after: true,
        }
    }
}

impl RetryConfig {
    #[must_use]
    pub fn no_retry() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_max_retries(mut self, max: u32) -> Self {
        self.max_retries = max;
        self
    }

    #[must_use]
    pub fn with_base_delay(mut self, delay: Duration) -> Self {
        self.base_delay = delay;
        self
    }

    #[must_use]
    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }
}

/// Per-request attempt counter.
#[derive(Debug, Clone)]
pub struct RetryState {
    config: RetryConfig,
    retries: u32,
}

impl RetryState {
    pub fn new(config: RetryConfig) -> Self {
        Self { config, retries: 0 }
    }

    /// Retries spent so far.
    pub fn retries(&self) -> u32 {
        self.retries
    }

    /// Delay before re-sending after a response with `status`, or `None`
    /// when the response should be returned as is.
    pub fn after_status(&mut self, status: u16, retry_after: Option<Duration>) -> Option<Duration> {
        if !is_retryable_status(status) {
            return None;
        }
        let hint = retry_after.filter(|_| self.config.respect_retry_after);
        self.next(hint)
    }

    /// Delay before re-sending after a transport error.
    pub fn after_error(&mut self, error: &ApiError) -> Option<Duration> {
        if !error.is_retryable() {
            return None;
        }
        self.next(None)
    }

    fn next(&mut self, hint: Option<Duration>) -> Option<Duration> {
        if self.retries >= self.config.max_retries {
            return None;
        }
        let backoff = self
            .config
            .base_delay
            .saturating_mul(1u32 << self.retries.min(16));
        self.retries += 1;
        Some(hint.unwrap_or(backoff).min(self.config.max_delay))
    }
}

/// Parses the delta-seconds form of `Retry-After`; HTTP dates are ignored.
pub fn parse_retry_after(value: &str) -> Option<Duration> {
    value.trim().parse::<u64>().ok().map(Duration::from_secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> RetryConfig {
        RetryConfig::default()
            .with_base_delay(Duration::from_millis(100))
            .with_max_delay(Duration::from_millis(350))
    }

    #[test]
    fn test_backoff_doubles_then_caps() {
        let mut state = RetryState::new(config().with_max_retries(4));
        let delays: Vec<_> = (0..5).map(|_| state.after_status(503, None)).collect();
        assert_eq!(
            delays,
            vec![
                Some(Duration::from_millis(100)),
                Some(Duration::from_millis(200)),
                Some(Duration::from_millis(350)),
                Some(Duration::from_millis(350)),
                None,
            ]
        );
        assert_eq!(state.retries(), 4);
    }

    #[test]
    fn test_client_errors_are_final() {
        let mut state = RetryState::new(config());
        assert_eq!(state.after_status(404, None), None);
        assert_eq!(state.after_status(500, None), None);
        assert_eq!(state.after_error(&ApiError::Aborted), None);
        assert_eq!(state.retries(), 0);
    }

    #[test]
    fn test_retry_after_is_capped() {
        let mut state = RetryState::new(config());
        assert_eq!(
            state.after_status(429, parse_retry_after("7")),
            Some(Duration::from_millis(350))
        );

        let mut state = RetryState::new(RetryConfig {
            respect_retry_after: false,
            ..config()
        });
        assert_eq!(
            state.after_status(429, Some(Duration::from_millis(300))),
            Some(Duration::from_millis(100))
        );
    }

    #[test]
    fn test_no_retry() {
        let mut state = RetryState::new(RetryConfig::no_retry());
        assert_eq!(state.after_error(&ApiError::Timeout), None);
    }

    #[test]
    fn test_parse_retry_after() {
        assert_eq!(parse_retry_after(" 3 "), Some(Duration::from_secs(3)));
        assert_eq!(parse_retry_after("Wed, 21 Oct 2015 07:28:00 GMT"), None);
    }
}
