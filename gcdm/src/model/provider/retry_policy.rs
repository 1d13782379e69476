use super::ProviderError;
use crate::config::RetryConfig;
use std::time::Duration;

/// bounded retries with exponential backoff around a fallible provider call.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// retries after the first attempt
    pub max_retries: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, initial_backoff: Duration, max_backoff: Duration) -> RetryPolicy {
        RetryPolicy {
            max_retries,
            initial_backoff,
            max_backoff,
        }
    }

    /// wait before the given retry (0-based): initial * 2^retry, capped at max_backoff.
    pub fn backoff(&self, retry: u32) -> Duration {
        let secs = self.initial_backoff.as_secs_f64() * 2f64.powi(retry as i32);
        Duration::from_secs_f64(secs.min(self.max_backoff.as_secs_f64()))
    }

    /// runs `op` until it succeeds, fails with a non-transient error or the retry
    /// budget is spent, returning the last error.
    pub fn run<T, F>(&self, name: &str, mut op: F) -> Result<T, ProviderError>
    where
        F: FnMut() -> Result<T, ProviderError>,
    {
        let mut retry = 0;
        loop {
            match op() {
                Ok(value) => return Ok(value),
                Err(e) if e.is_transient() && retry < self.max_retries => {
                    let wait = self.backoff(retry);
                    log::debug!(
                        "{name} attempt {} failed ({e}), retrying in {:.1}s",
                        retry + 1,
                        wait.as_secs_f64()
                    );
                    std::thread::sleep(wait);
                    retry += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy::from(&RetryConfig::default())
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(value: &RetryConfig) -> Self {
        RetryPolicy {
            max_retries: value.max_retries,
            initial_backoff: backoff_duration(value.initial_backoff_seconds),
            max_backoff: backoff_duration(value.max_backoff_seconds),
        }
    }
}

/// negative, non-finite or unrepresentable backoffs collapse to no wait.
fn backoff_duration(seconds: f64) -> Duration {
    Duration::try_from_secs_f64(seconds.max(0.0)).unwrap_or(Duration::ZERO)
}
