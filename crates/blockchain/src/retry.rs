use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// Retry configuration with exponential backoff
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of attempts, including the first one
    pub max_attempts: u32,
    /// Initial delay before first retry
    pub initial_delay: Duration,
    /// Maximum delay between retries
    pub max_delay: Duration,
    /// Multiplier for exponential backoff (typically 2.0)
    pub backoff_multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(10),
            backoff_multiplier: 2.0,
        }
    }
}

impl RetryConfig {
    pub fn with_max_attempts(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            ..Self::default()
        }
    }

    /// A single attempt, no retries
    pub fn none() -> Self {
        Self::with_max_attempts(1)
    }

    /// Calculate the delay for a given attempt number (0-indexed)
    pub fn calculate_delay(&self, attempt: u32) -> Duration {
        let delay_ms = (self.initial_delay.as_millis() as f64)
            * self.backoff_multiplier.powi(attempt as i32);

        let delay = Duration::from_millis(delay_ms as u64);

        if delay > self.max_delay {
            self.max_delay
        } else {
            delay
        }
    }
}

/// Execute an operation, retrying failures accepted by `should_retry`
///
/// Errors rejected by `should_retry` are returned immediately. Only use this
/// for idempotent reads: a retried submission could be applied twice.
///
/// # Arguments
/// * `operation_name` - Name of the operation for logging
/// * `config` - Retry configuration
/// * `should_retry` - Decides whether a given error is transient
/// * `operation` - Async function to execute
pub async fn retry_with_backoff<F, Fut, T, E, P>(
    operation_name: &str,
    config: &RetryConfig,
    should_retry: P,
    mut operation: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, E>>,
    E: std::fmt::Display,
    P: Fn(&E) -> bool,
{
    let max_attempts = config.max_attempts.max(1);
    let mut attempt = 0;

    loop {
        debug!(
            "Executing '{}' - attempt {}/{}",
            operation_name,
            attempt + 1,
            max_attempts
        );

        match operation().await {
            Ok(result) => {
                if attempt > 0 {
                    debug!(
                        "'{}' succeeded on attempt {}/{}",
                        operation_name,
                        attempt + 1,
                        max_attempts
                    );
                }
                return Ok(result);
            }
            Err(e) => {
                let last_attempt = attempt + 1 >= max_attempts;
                if last_attempt || !should_retry(&e) {
                    return Err(e);
                }

                warn!(
                    "'{}' failed on attempt {}/{}: {}",
                    operation_name,
                    attempt + 1,
                    max_attempts,
                    e
                );

                let delay = config.calculate_delay(attempt);
                debug!("Retrying '{}' after {:?}", operation_name, delay);
                sleep(delay).await;
                attempt += 1;
            }
        }
    }
}
