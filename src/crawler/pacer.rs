//! Politeness pacing between consecutive requests

use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Enforces a minimum spacing between the starts of two requests
#[derive(Debug, Clone)]
pub struct Pacer {
    /// Minimum time between two requests
    delay: Duration,

    /// Timestamp of the last request
    last_request: Option<Instant>,
}

impl Pacer {
    /// Creates a pacer with the given politeness delay
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            last_request: None,
        }
    }

    /// Records that a request starts now
    pub fn record_request(&mut self, now: Instant) {
        self.last_request = Some(now);
    }

    /// Calculates the time until the next request can be made
    ///
    /// Returns None if a request can be made now.
    pub fn time_until_ready(&self, now: Instant) -> Option<Duration> {
        let last = self.last_request?;
        let elapsed = now.saturating_duration_since(last);
        if elapsed < self.delay {
            Some(self.delay - elapsed)
        } else {
            None
        }
    }

    /// Waits until the next request is allowed
    ///
    /// Returns false if cancellation was observed while waiting.
    pub async fn wait(&self, cancel: &CancellationToken) -> bool {
        let Some(wait) = self.time_until_ready(Instant::now()) else {
            return !cancel.is_cancelled();
        };

        tracing::trace!("Pacing: waiting {:?} before next request", wait);
        tokio::select! {
            _ = cancel.cancelled() => false,
            _ = tokio::time::sleep(wait) => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_request_is_immediate() {
        let pacer = Pacer::new(Duration::from_secs(1));
        assert_eq!(pacer.time_until_ready(Instant::now()), None);
    }

    #[test]
    fn test_time_until_ready() {
        let mut pacer = Pacer::new(Duration::from_millis(1000));
        let start = Instant::now();
        pacer.record_request(start);

        assert_eq!(
            pacer.time_until_ready(start + Duration::from_millis(300)),
            Some(Duration::from_millis(700))
        );
        assert_eq!(pacer.time_until_ready(start + Duration::from_millis(1000)), None);
        assert_eq!(pacer.time_until_ready(start + Duration::from_secs(5)), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_sleeps_for_remaining_delay() {
        let mut pacer = Pacer::new(Duration::from_secs(2));
        let start = Instant::now();
        pacer.record_request(start);

        assert!(pacer.wait(&CancellationToken::new()).await);
        assert!(start.elapsed() >= Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_wait_observes_cancellation() {
        let mut pacer = Pacer::new(Duration::from_secs(60));
        pacer.record_request(Instant::now());

        let cancel = CancellationToken::new();
        cancel.cancel();

        assert!(!pacer.wait(&cancel).await);
    }

    #[tokio::test]
    async fn test_wait_without_delay_reports_cancellation() {
        let pacer = Pacer::new(Duration::ZERO);
        let cancel = CancellationToken::new();
        assert!(pacer.wait(&cancel).await);

        cancel.cancel();
        assert!(!pacer.wait(&cancel).await);
    }
}
