//! Fixed-delay retry for whole pipeline invocations

use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, warn};

use crate::error::Result;

/// Run `job`, retrying up to `retries` extra times after a fixed `delay`.
///
/// Every failure is retried regardless of its kind, the way the recurring
/// job always was; the error of the last attempt is returned.
///
/// # Arguments
/// * `description` - Human-readable name of the job, for logs
/// * `retries` - Attempts allowed after the first one
/// * `delay` - Wait before each retry
/// * `job` - Produces a fresh future per attempt
pub async fn retry_with_delay<T, F, Fut>(
    description: &str,
    retries: u32,
    delay: Duration,
    mut job: F,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut attempt = 0;

    loop {
        match job().await {
            Ok(value) => return Ok(value),
            Err(e) if attempt < retries => {
                attempt += 1;
                warn!(
                    recoverable = e.is_recoverable(),
                    "{} failed: {}; retrying in {:?} (attempt {}/{})",
                    description,
                    e,
                    delay,
                    attempt,
                    retries
                );
                sleep(delay).await;
            }
            Err(e) => {
                error!(
                    "{} failed after {} retries: {}",
                    description, retries, e
                );
                return Err(e);
            }
        }
    }
}
