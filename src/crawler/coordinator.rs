//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the crawl loop that ties the frontier, the fetch
//! gateway, the link extractor, and the URL classifier together:
//! - Seeding the frontier and tracking visited URLs
//! - Pacing outbound requests
//! - Classifying discovered links and routing them
//! - Observing cancellation between fetches

use crate::config::{Config, CrawlTarget};
use crate::crawler::fetcher::{HttpFetch, ReqwestFetcher};
use crate::crawler::frontier::Frontier;
use crate::crawler::gateway::{FetchGateway, FetchOutcome};
use crate::crawler::pacer::Pacer;
use crate::crawler::parser::{HtmlLinkExtractor, LinkExtractor};
use crate::output::{CrawlReport, CrawlSnapshot, ResultCollector};
use crate::url::{canonicalize, classify, Classification};
use crate::CrawliError;
use serde::Serialize;
use std::collections::HashSet;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use url::Url;

/// Lifecycle of a crawl run
///
/// `Idle → Running → {Completed, Aborted}`; there are no other transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CrawlState {
    /// Created, not started yet
    Idle,
    /// The crawl loop is active
    Running,
    /// Frontier exhausted or page budget reached
    Completed,
    /// Stopped by a cancellation signal
    Aborted,
}

impl CrawlState {
    /// Lowercase name, used in reports
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Aborted => "aborted",
        }
    }
}

/// Main crawler coordinator structure
///
/// A coordinator owns all state of exactly one run. Starting another run
/// requires a new coordinator.
pub struct Coordinator<F = ReqwestFetcher, E = HtmlLinkExtractor> {
    target: CrawlTarget,
    gateway: FetchGateway<F>,
    extractor: E,
    frontier: Frontier,
    visited: HashSet<String>,
    results: ResultCollector,
    pacer: Pacer,
    state: CrawlState,
    progress: watch::Sender<CrawlSnapshot>,
}

impl Coordinator {
    /// Creates a coordinator with the default HTTP client and HTML extractor
    ///
    /// # Arguments
    ///
    /// * `config` - The crawler configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(CrawliError)` - Invalid configuration or HTTP client failure
    pub fn new(config: &Config) -> Result<Self, CrawliError> {
        let target = CrawlTarget::from_config(config)?;
        let fetcher = ReqwestFetcher::new(&config.http)?;
        Ok(Self::with_collaborators(target, fetcher, HtmlLinkExtractor))
    }
}

impl<F: HttpFetch, E: LinkExtractor> Coordinator<F, E> {
    /// Creates a coordinator around custom transport and extraction
    pub fn with_collaborators(target: CrawlTarget, fetcher: F, extractor: E) -> Self {
        let gateway = FetchGateway::new(fetcher, &target);
        let pacer = Pacer::new(target.request_delay);
        let results = ResultCollector::new();
        let (progress, _) = watch::channel(results.snapshot());

        Self {
            target,
            gateway,
            extractor,
            frontier: Frontier::new(),
            visited: HashSet::new(),
            results,
            pacer,
            state: CrawlState::Idle,
            progress,
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> CrawlState {
        self.state
    }

    /// Sorted targets and counters collected so far
    pub fn snapshot(&self) -> CrawlSnapshot {
        self.results.snapshot()
    }

    /// Returns a receiver that sees a fresh snapshot after every fetched URL
    ///
    /// `run` borrows the coordinator for the whole crawl; subscribe before
    /// starting it to follow progress from another task.
    pub fn subscribe(&self) -> watch::Receiver<CrawlSnapshot> {
        self.progress.subscribe()
    }

    /// Number of URLs waiting in the frontier
    pub fn frontier_size(&self) -> usize {
        self.frontier.len()
    }

    /// Number of URLs fetched or attempted
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Runs the crawl loop until completion or cancellation
    ///
    /// This is the core crawling logic that:
    /// 1. Pops the next URL from the frontier
    /// 2. Skips URLs already visited or classified as ignored
    /// 3. Waits for the politeness delay, then fetches through the gateway
    /// 4. Extracts and classifies links of successfully fetched pages
    /// 5. Collects targets and enqueues followable URLs
    ///
    /// Per-URL failures never end the run. Cancellation is observed between
    /// fetches and during waits; the returned report then carries the
    /// partial results.
    pub async fn run(&mut self, cancel: CancellationToken) -> Result<CrawlReport, CrawliError> {
        if self.state != CrawlState::Idle {
            return Err(CrawliError::AlreadyStarted);
        }

        self.state = CrawlState::Running;
        self.results.mark_started();
        self.frontier.push(canonicalize(&self.target.seed_url));

        tracing::info!(
            "Starting crawl of {} from {} (max {} pages)",
            self.target.base_url,
            self.target.seed_url,
            self.target.max_pages
        );

        let max_pages = self.target.max_pages as usize;
        let start_time = std::time::Instant::now();

        let final_state = loop {
            if cancel.is_cancelled() {
                tracing::info!("Cancellation requested, stopping crawl");
                break CrawlState::Aborted;
            }

            if self.visited.len() >= max_pages {
                tracing::info!("Page budget of {} reached", max_pages);
                break CrawlState::Completed;
            }

            let url = match self.frontier.pop() {
                Some(url) => url,
                None => {
                    tracing::info!("Frontier is empty, crawl complete");
                    break CrawlState::Completed;
                }
            };

            if self.visited.contains(&url) {
                tracing::debug!("Skipping already visited URL: {}", url);
                continue;
            }

            match classify(&url, &self.target) {
                Classification::Ignored(_) | Classification::OutOfScope(_) => {
                    tracing::debug!("Skipping {} without fetching", url);
                    continue;
                }
                Classification::Target(_) | Classification::Followable(_) => {}
            }

            if !self.pacer.wait(&cancel).await {
                tracing::info!("Cancellation requested while pacing, stopping crawl");
                break CrawlState::Aborted;
            }

            self.visited.insert(url.clone());

            let outcome = self
                .gateway
                .fetch(&url, self.results.stats_mut(), &mut self.pacer, &cancel)
                .await;

            let crawled = match outcome {
                FetchOutcome::Success(body) => {
                    self.results.stats_mut().pages_crawled += 1;
                    self.process_page(&url, &body);
                    true
                }
                FetchOutcome::TransientFailure(reason) | FetchOutcome::PermanentFailure(reason) => {
                    tracing::warn!("Skipping {}: {}", url, reason);
                    false
                }
                FetchOutcome::Cancelled => break CrawlState::Aborted,
            };

            self.progress.send_replace(self.snapshot());
            if !crawled {
                continue;
            }

            let pages_crawled = self.results.stats().pages_crawled;
            if pages_crawled % 10 == 0 {
                let elapsed = start_time.elapsed();
                let rate = pages_crawled as f64 / elapsed.as_secs_f64().max(f64::EPSILON);
                tracing::info!(
                    "Progress: {} pages crawled, {} in frontier, {} targets, {:.2} pages/sec",
                    pages_crawled,
                    self.frontier.len(),
                    self.results.len(),
                    rate
                );
            }
        };

        self.state = final_state;
        self.results.mark_finished();
        self.progress.send_replace(self.snapshot());

        if self.results.is_empty() {
            tracing::warn!("No URL matched the target pattern {}", self.target.target_pattern);
        }

        let report = CrawlReport::from_snapshot(
            final_state,
            self.target.base_url.as_str(),
            self.results.snapshot(),
        );

        tracing::info!(
            "Crawl {}: {} pages crawled, {} targets found, {} fetch errors, {} retries in {:?}",
            final_state.as_str(),
            report.stats.pages_crawled,
            report.stats.targets_found,
            report.stats.fetch_errors,
            report.stats.retries_performed,
            start_time.elapsed()
        );

        Ok(report)
    }

    /// Extracts links from a fetched page and routes each one
    fn process_page(&mut self, url: &str, body: &str) {
        let page_url = match Url::parse(url) {
            Ok(page_url) => page_url,
            Err(e) => {
                tracing::warn!("Cannot resolve links of {}: {}", url, e);
                return;
            }
        };

        let links = self.extractor.extract_links(body, &page_url);
        tracing::debug!("Found {} links on {}", links.len(), url);

        for link in links {
            match classify(&link, &self.target) {
                Classification::Target(target_url) => {
                    if self.results.add(target_url.clone()) {
                        tracing::info!("Found target URL: {}", target_url);
                    }
                }
                Classification::Followable(next) => {
                    self.frontier.push(next);
                }
                dropped => {
                    tracing::debug!("Dropping {} link: {}", dropped.label(), dropped.url());
                }
            }
        }
    }
}
