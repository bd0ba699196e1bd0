//! Bounded retry with exponential backoff for provider calls

use std::fmt;
use std::future::Future;
use std::time::Duration;

use reqwest::StatusCode;
use tracing::warn;

/// Longest single backoff sleep
const MAX_BACKOFF: Duration = Duration::from_secs(10);

/// Outcome of one failed provider attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderFailure {
    /// Network trouble, rate limiting or an upstream 5xx
    Transient(String),
    /// Anything a retry cannot fix (bad request, auth, undecodable reply)
    Permanent(String),
}

impl ProviderFailure {
    /// Classify a non-success HTTP status
    #[must_use]
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let message = format!("({status}) {body}");
        if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
            Self::Transient(message)
        } else {
            Self::Permanent(message)
        }
    }

    /// Classify a transport-level error
    #[must_use]
    pub fn from_request(err: &reqwest::Error) -> Self {
        if err.is_decode() || err.is_builder() {
            Self::Permanent(err.to_string())
        } else {
            Self::Transient(err.to_string())
        }
    }

    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Transient(_))
    }

    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Transient(message) | Self::Permanent(message) => message,
        }
    }
}

impl fmt::Display for ProviderFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Extra attempts after the first one
    pub max_retries: u32,
    pub base_delay: Duration,
}

impl RetryPolicy {
    #[must_use]
    pub const fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
        }
    }

    /// Single attempt, never sleeps
    #[must_use]
    pub const fn none() -> Self {
        Self::new(0, Duration::ZERO)
    }

    /// Sleep before retry number `retry` (1-based): base * 2^(retry-1), capped
    #[must_use]
    pub fn delay_for(&self, retry: u32) -> Duration {
        let factor = 2u32.saturating_pow(retry.saturating_sub(1));
        self.base_delay.saturating_mul(factor).min(MAX_BACKOFF)
    }

    /// Run `attempt` until it succeeds, fails permanently, or retries run out
    pub async fn run<T, F, Fut>(&self, operation: &str, mut attempt: F) -> Result<T, ProviderFailure>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ProviderFailure>>,
    {
        let mut retry = 0;
        loop {
            match attempt().await {
                Ok(value) => return Ok(value),
                Err(failure) if failure.is_retryable() && retry < self.max_retries => {
                    retry += 1;
                    let delay = self.delay_for(retry);
                    warn!(
                        "{} failed (attempt {}/{}): {}. Retrying in {}ms",
                        operation,
                        retry,
                        self.max_retries + 1,
                        failure,
                        delay.as_millis()
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(failure) => return Err(failure),
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(2, Duration::from_millis(500))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicU32;
    use std::sync::atomic::Ordering;

    use super::*;

    #[test]
    fn test_status_classification() {
        assert!(ProviderFailure::from_status(StatusCode::TOO_MANY_REQUESTS, "slow down").is_retryable());
        assert!(ProviderFailure::from_status(StatusCode::BAD_GATEWAY, "").is_retryable());
        assert!(!ProviderFailure::from_status(StatusCode::UNAUTHORIZED, "bad key").is_retryable());
        assert!(!ProviderFailure::from_status(StatusCode::BAD_REQUEST, "").is_retryable());
    }

    #[test]
    fn test_backoff_doubles_and_caps() {
        let policy = RetryPolicy::new(10, Duration::from_millis(100));
        assert_eq!(policy.delay_for(1), Duration::from_millis(100));
        assert_eq!(policy.delay_for(2), Duration::from_millis(200));
        assert_eq!(policy.delay_for(3), Duration::from_millis(400));
        assert_eq!(policy.delay_for(20), MAX_BACKOFF);
    }

    #[tokio::test]
    async fn test_retries_transient_then_succeeds() {
        let calls = AtomicU32::new(0);
        let policy = RetryPolicy::new(3, Duration::from_millis(1));
        let result = policy
            .run("test", || async {
                if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err(ProviderFailure::Transient("flaky".to_string()))
                } else {
                    Ok("done")
                }
            })
            .await;
        assert_eq!(result, Ok("done"));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_permanent_failure_is_not_retried() {
        let calls = AtomicU32::new(0);
        let policy = RetryPolicy::new(3, Duration::from_millis(1));
        let result: Result<(), _> = policy
            .run("test", || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(ProviderFailure::Permanent("bad request".to_string()))
            })
            .await;
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_retries() {
        let calls = AtomicU32::new(0);
        let policy = RetryPolicy::new(2, Duration::from_millis(1));
        let result: Result<(), _> = policy
            .run("test", || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(ProviderFailure::Transient("down".to_string()))
            })
            .await;
        assert_eq!(result, Err(ProviderFailure::Transient("down".to_string())));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }
}
