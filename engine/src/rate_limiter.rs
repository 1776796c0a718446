//! Rate limiting module
//!
//! The pipeline issues its collaborator calls strictly sequentially and
//! inserts a short pause between platform generations as a courtesy to
//! the shared upstream quota. The pause is an explicit, configurable
//! component rather than a sleep constant scattered through the
//! orchestrator, so tests inject a zero-delay pacer and run instantly.

use std::time::Duration;
use tokio::time::sleep;
use tracing::trace;

/// Fixed inter-call pause between upstream requests
#[derive(Debug, Clone)]
pub struct CallPacer {
    delay: Duration,
}

impl CallPacer {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// A pacer that never pauses; used by tests.
    pub fn disabled() -> Self {
        Self {
            delay: Duration::ZERO,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Wait out the configured delay. A zero delay returns immediately
    /// without touching the timer wheel.
    pub async fn pause(&self) {
        if self.delay.is_zero() {
            return;
        }
        trace!("pacing upstream calls: sleeping {:?}", self.delay);
        sleep(self.delay).await;
    }
}

impl Default for CallPacer {
    /// The default 2-second courtesy pause. A tunable, not a
    /// correctness property.
    fn default() -> Self {
        Self {
            delay: Duration::from_secs(2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_pause_waits_configured_delay() {
        let pacer = CallPacer::new(Duration::from_secs(2));
        let started = tokio::time::Instant::now();
        pacer.pause().await;
        assert_eq!(started.elapsed(), Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_disabled_pacer_does_not_sleep() {
        let pacer = CallPacer::disabled();
        let started = tokio::time::Instant::now();
        pacer.pause().await;
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[test]
    fn test_default_delay() {
        assert_eq!(CallPacer::default().delay(), Duration::from_secs(2));
    }
}
