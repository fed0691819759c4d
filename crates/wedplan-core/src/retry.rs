//! Bounded retry with exponential backoff for backing-store calls.

use std::future::Future;

use tracing::warn;

use crate::config::RetryConfig;
use crate::error::AppError;
use crate::result::AppResult;

/// Runs `op` until it succeeds, fails with a non-transient error, runs out
/// of attempts, or exceeds the policy's overall timeout.
///
/// Only errors whose kind is transient (database / unavailable) are retried.
/// A timeout is reported as `ServiceUnavailable`.
pub async fn with_retry<T, F, Fut>(policy: &RetryConfig, operation: &str, mut op: F) -> AppResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = AppResult<T>>,
{
    let attempts = async {
        let mut attempt = 1u32;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_transient() && attempt < policy.max_attempts => {
                    let delay = policy.backoff_for(attempt);
                    warn!(
                        operation = %operation,
                        attempt = attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "Transient store failure, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    };

    match tokio::time::timeout(policy.timeout(), attempts).await {
        Ok(result) => result,
        Err(_) => Err(AppError::service_unavailable(format!(
            "{operation} timed out after {}ms",
            policy.timeout_ms
        ))),
    }
}
