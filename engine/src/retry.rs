//! Retry with linear backoff
//!
//! Wraps a single collaborator call with a bounded retry loop. Only
//! errors classified transient by [`AgentError::is_transient`] are
//! retried; everything else propagates on the first attempt. The same
//! policy applies to every collaborator call in the pipeline, with no
//! per-collaborator override.

use crate::agents::{AgentError, Result};
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, warn};

/// Bounded linear-backoff retry executor
///
/// Backoff grows linearly with the attempt number: `retry_delay × 1`
/// after the first failure, `× 2` after the second, and so on.
#[derive(Debug, Clone)]
pub struct RetryExecutor {
    max_retries: u32,
    retry_delay: Duration,
}

impl Default for RetryExecutor {
    fn default() -> Self {
        Self {
            max_retries: 3,
            retry_delay: Duration::from_secs(10),
        }
    }
}

impl RetryExecutor {
    pub fn new(max_retries: u32, retry_delay: Duration) -> Self {
        Self {
            max_retries,
            retry_delay,
        }
    }

    /// Execute `op`, retrying transient failures up to `max_retries`
    /// total attempts.
    ///
    /// Non-transient errors, and the transient error of the final
    /// attempt, propagate unchanged so callers see the underlying
    /// failure. `label` only feeds the logs.
    pub async fn execute<T, F, Fut>(&self, label: &str, mut op: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        for attempt in 1..=self.max_retries {
            match op().await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_transient() && attempt < self.max_retries => {
                    let delay = self.retry_delay * attempt;
                    warn!(
                        "{} call overloaded, retrying in {:?} (attempt {}/{}): {}",
                        label, delay, attempt, self.max_retries, e
                    );
                    sleep(delay).await;
                }
                Err(e) => {
                    error!("{} call failed after {} attempt(s): {}", label, attempt, e);
                    return Err(e);
                }
            }
        }

        // Only reachable with max_retries == 0.
        Err(AgentError::RetriesExhausted)
    }
}
