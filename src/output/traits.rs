//! Output handler traits and types
//!
//! This module defines the trait interface for output handlers and the
//! final report they consume.

use crate::crawler::CrawlState;
use crate::output::collector::{CrawlSnapshot, RunStats};
use serde::Serialize;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Final result of a crawl run
///
/// Produced for both completed and aborted runs; partial results of an
/// aborted run are as meaningful as complete ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrawlReport {
    /// Terminal state of the run
    pub state: CrawlState,

    /// Base URL the run was scoped to
    pub base_url: String,

    /// Target URLs in ascending order
    pub targets: Vec<String>,

    /// Final counters
    pub stats: RunStats,
}

impl CrawlReport {
    /// Builds a report from a collector snapshot
    pub fn from_snapshot(state: CrawlState, base_url: &str, snapshot: CrawlSnapshot) -> Self {
        Self {
            state,
            base_url: base_url.to_string(),
            targets: snapshot.targets,
            stats: snapshot.stats,
        }
    }

    /// Returns true if the run was cut short by cancellation
    pub fn is_partial(&self) -> bool {
        self.state == CrawlState::Aborted
    }
}

/// Trait for output handlers
///
/// Output handlers persist a finished report. Implementations own the
/// on-disk representation; the report is already sorted.
pub trait OutputHandler {
    /// Writes the report
    ///
    /// # Arguments
    ///
    /// * `report` - The final report of the run
    fn write(&self, report: &CrawlReport) -> OutputResult<()>;
}
