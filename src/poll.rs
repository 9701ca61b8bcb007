//! Bounded retry of a fallible async action

use std::future::Future;
use std::time::Duration;
use tokio::time::{sleep, timeout_at, Instant};

use crate::error::{AutomationError, Result};

/// Retry `action` every `interval` until it succeeds or `timeout` has elapsed
///
/// One attempt is in flight at a time and a success returns immediately. The
/// deadline is fixed at the first attempt: an attempt still running at the
/// deadline is dropped, and no attempt starts once the deadline has passed.
pub async fn timeout<T, F, Fut>(interval: Duration, timeout: Duration, mut action: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let deadline = Instant::now() + timeout;
    let expired = |attempts: u32, last_error: String| {
        tracing::debug!("Giving up after {} attempts: {}", attempts, last_error);
        AutomationError::Timeout {
            timeout_ms: timeout.as_millis() as u64,
            last_error,
        }
    };
    let mut attempt = 0u32;

    loop {
        attempt += 1;
        let last_error = match timeout_at(deadline, action()).await {
            Ok(Ok(value)) => return Ok(value),
            Ok(Err(e)) => e.to_string(),
            Err(_) => {
                return Err(expired(
                    attempt,
                    format!("attempt {} was still running at the deadline", attempt),
                ))
            }
        };

        let now = Instant::now();
        if now >= deadline {
            return Err(expired(attempt, last_error));
        }
        tracing::trace!(
            "Attempt {} failed, retrying in {:?}: {}",
            attempt,
            interval,
            last_error
        );
        sleep(interval.min(deadline - now)).await;
        if Instant::now() >= deadline {
            return Err(expired(attempt, last_error));
        }
    }
}
