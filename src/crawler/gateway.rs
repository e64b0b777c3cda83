//! Fetch gateway: bounded retry with backoff around the HTTP collaborator
//!
//! | Condition | Outcome of one attempt |
//! |-----------|------------------------|
//! | HTTP 200, non-empty body | Success |
//! | HTTP 200, zero-length body | TransientFailure |
//! | Any other status | TransientFailure |
//! | Timeout / connection error | TransientFailure |
//! | Request cannot be built | PermanentFailure |
//!
//! Transient failures are retried until the policy's attempt budget is
//! spent, after which the URL is reported as a permanent failure. Every
//! attempt, retries included, goes through the run's [`Pacer`], so a short
//! backoff never brings two requests closer than the politeness delay.

use crate::config::CrawlTarget;
use crate::crawler::fetcher::HttpFetch;
use crate::crawler::pacer::Pacer;
use crate::crawler::retry::RetryPolicy;
use crate::output::RunStats;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Result of fetching a URL through the gateway
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Page body of a successful fetch
    Success(String),

    /// A failure that may go away on retry
    TransientFailure(String),

    /// A failure that will not be retried in this run
    PermanentFailure(String),

    /// Cancellation was observed while waiting between attempts
    Cancelled,
}

impl FetchOutcome {
    /// Returns true for a successful fetch
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

/// Wraps an [`HttpFetch`] implementation with the run's retry policy
pub struct FetchGateway<F> {
    fetcher: F,
    timeout: Duration,
    retry: RetryPolicy,
}

impl<F: HttpFetch> FetchGateway<F> {
    /// Creates a gateway using the target's timeout and retry policy
    pub fn new(fetcher: F, target: &CrawlTarget) -> Self {
        Self {
            fetcher,
            timeout: target.fetch_timeout,
            retry: target.retry,
        }
    }

    /// Performs a single attempt and classifies its outcome
    pub async fn attempt(&self, url: &str) -> FetchOutcome {
        match self.fetcher.fetch(url, self.timeout).await {
            Ok(response) if response.status == 200 => {
                if response.body.is_empty() {
                    FetchOutcome::TransientFailure("HTTP 200 with empty body".to_string())
                } else {
                    FetchOutcome::Success(response.body)
                }
            }
            Ok(response) => FetchOutcome::TransientFailure(format!("HTTP {}", response.status)),
            Err(e) if e.is_retryable() => FetchOutcome::TransientFailure(e.to_string()),
            Err(e) => FetchOutcome::PermanentFailure(e.to_string()),
        }
    }

    /// Fetches a URL, retrying transient failures
    ///
    /// Every retry increments `stats.retries_performed`; a final failure
    /// increments `stats.fetch_errors` exactly once. Cancellation is only
    /// observed during backoff waits, never in the middle of a request.
    ///
    /// The caller waits on `pacer` before the first attempt; each attempt is
    /// recorded on it, and a retry waits for the longer of the backoff and
    /// the remaining politeness delay.
    ///
    /// The returned outcome is never `TransientFailure`.
    pub async fn fetch(
        &self,
        url: &str,
        stats: &mut RunStats,
        pacer: &mut Pacer,
        cancel: &CancellationToken,
    ) -> FetchOutcome {
        let attempts = self.retry.attempts();
        let mut failed = 0;

        loop {
            tracing::info!("Fetching page: {} (attempt {}/{})", url, failed + 1, attempts);

            pacer.record_request(Instant::now());
            let reason = match self.attempt(url).await {
                FetchOutcome::Success(body) => {
                    tracing::info!("Successfully loaded page: {}", url);
                    return FetchOutcome::Success(body);
                }
                FetchOutcome::PermanentFailure(reason) => {
                    tracing::error!("Permanent failure for {}: {}", url, reason);
                    stats.fetch_errors += 1;
                    return FetchOutcome::PermanentFailure(reason);
                }
                FetchOutcome::TransientFailure(reason) => reason,
                FetchOutcome::Cancelled => return FetchOutcome::Cancelled,
            };

            failed += 1;

            if !self.retry.should_retry(failed) {
                tracing::error!(
                    "Giving up on {} after {} attempts: {}",
                    url,
                    failed,
                    reason
                );
                stats.fetch_errors += 1;
                return FetchOutcome::PermanentFailure(format!(
                    "{} (after {} attempts)",
                    reason, failed
                ));
            }

            let pacing = pacer.time_until_ready(Instant::now()).unwrap_or_default();
            let wait = self.retry.backoff(failed).max(pacing);
            tracing::warn!("{} for {}, retrying in {:?}", reason, url, wait);

            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Cancellation observed while backing off from {}", url);
                    return FetchOutcome::Cancelled;
                }
                _ = tokio::time::sleep(wait) => {}
            }

            stats.retries_performed += 1;
        }
    }
}
