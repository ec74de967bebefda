// src/retry.rs
//! Retry policy and outcome classification for the resilient transport.
//!
//! Classification is kept as pure functions so the backoff behavior can
//! be tested without timers or network access.

use std::time::Duration;
use crate::Error;

pub const HTTP_TOO_MANY_REQUESTS: u16 = 429;

#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total tries including the first. (5 = 4 retries)
    pub max_attempts: u32,
    /// Fixed delay between attempts after a transient failure.
    pub transient_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            transient_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Backoff before the next try after the rate limiter rejected
    /// attempt number `attempt` (zero-based): 1s, 2s, 4s, 8s, 16s.
    pub fn rate_limit_backoff(&self, attempt: u32) -> Duration {
        Duration::from_secs(1u64 << attempt)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryClass {
    /// 429 from the remote: back off exponentially.
    RateLimited,
    /// Never produced an HTTP status: retry after the fixed delay.
    Transient,
    /// Any other failure: surface immediately.
    NoRetry,
}

pub fn classify_status(status: u16) -> RetryClass {
    if status == HTTP_TOO_MANY_REQUESTS {
        RetryClass::RateLimited
    } else {
        RetryClass::NoRetry
    }
}

pub fn classify_error(err: &Error) -> RetryClass {
    match err {
        Error::Http(_) | Error::Transport(_) => RetryClass::Transient,
        _ => RetryClass::NoRetry,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_429_is_rate_limited() {
        assert_eq!(classify_status(429), RetryClass::RateLimited);
    }

    #[test]
    fn other_error_statuses_are_not_retried() {
        assert_eq!(classify_status(500), RetryClass::NoRetry);
        assert_eq!(classify_status(404), RetryClass::NoRetry);
        assert_eq!(classify_status(403), RetryClass::NoRetry);
    }

    #[test]
    fn network_level_errors_are_transient() {
        let err = Error::Transport("connection reset".into());
        assert_eq!(classify_error(&err), RetryClass::Transient);
    }

    #[test]
    fn backoff_doubles_per_attempt() {
        let policy = RetryPolicy::default();
        let total: u64 = (0..policy.max_attempts)
            .map(|a| policy.rate_limit_backoff(a).as_secs())
            .sum();
        assert_eq!(total, 31);
    }
}
