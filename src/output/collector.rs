//! Result collection for a single crawl run

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashSet;

/// Counters of one crawl run
///
/// All counters are monotonically non-decreasing while the run is active.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    /// Pages fetched successfully
    pub pages_crawled: u64,

    /// Distinct target URLs found
    pub targets_found: u64,

    /// URLs that failed for good after all attempts
    pub fetch_errors: u64,

    /// Extra attempts made after transient failures
    pub retries_performed: u64,

    /// When the run left the idle state
    pub started_at: Option<DateTime<Utc>>,

    /// When the run reached a terminal state
    pub finished_at: Option<DateTime<Utc>>,
}

impl RunStats {
    /// Wall-clock duration of the run, once it has finished
    pub fn duration(&self) -> Option<chrono::Duration> {
        match (self.started_at, self.finished_at) {
            (Some(started), Some(finished)) => Some(finished - started),
            _ => None,
        }
    }
}

/// Point-in-time copy of the collected results
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlSnapshot {
    /// Target URLs in ascending order
    pub targets: Vec<String>,

    /// Counters at the time of the snapshot
    pub stats: RunStats,
}

/// Accumulates target URLs and run counters
#[derive(Debug, Default)]
pub struct ResultCollector {
    targets: HashSet<String>,
    stats: RunStats,
}

impl ResultCollector {
    /// Creates an empty collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a target URL
    ///
    /// Returns true if the URL was new; `targets_found` only moves then.
    pub fn add(&mut self, url: impl Into<String>) -> bool {
        let inserted = self.targets.insert(url.into());
        if inserted {
            self.stats.targets_found += 1;
        }
        inserted
    }

    /// Number of collected targets
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Returns whether no target was collected
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Current counters
    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    /// Mutable counters for the crawl loop and the fetch gateway
    pub(crate) fn stats_mut(&mut self) -> &mut RunStats {
        &mut self.stats
    }

    /// Stamps the start of the run
    pub(crate) fn mark_started(&mut self) {
        self.stats.started_at = Some(Utc::now());
    }

    /// Stamps the end of the run
    pub(crate) fn mark_finished(&mut self) {
        self.stats.finished_at = Some(Utc::now());
    }

    /// Returns the targets, sorted, together with a copy of the counters
    pub fn snapshot(&self) -> CrawlSnapshot {
        let mut targets: Vec<String> = self.targets.iter().cloned().collect();
        targets.sort();

        CrawlSnapshot {
            targets,
            stats: self.stats.clone(),
        }
    }
}
