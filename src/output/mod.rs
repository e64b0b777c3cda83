//! Output module for collecting and persisting crawl results
//!
//! This module handles:
//! - Accumulating target URLs and run counters during a crawl
//! - Writing the final report as text, JSON, or SQLite
//! - Printing run statistics

mod collector;
mod json;
mod sqlite_output;
pub mod stats;
mod text;
mod traits;

pub use collector::{CrawlSnapshot, ResultCollector, RunStats};
pub use json::JsonOutput;
pub use sqlite_output::SqliteOutput;
pub use stats::{format_statistics, print_statistics};
pub use text::{render_text, TextOutput};
pub use traits::{CrawlReport, OutputError, OutputHandler, OutputResult};

use crate::config::{OutputConfig, OutputFormat};

/// Builds the output handler selected by the configuration
pub fn handler_for(config: &OutputConfig) -> Box<dyn OutputHandler> {
    match config.format {
        OutputFormat::Txt => Box::new(TextOutput::new(&config.path)),
        OutputFormat::Json => Box::new(JsonOutput::new(&config.path)),
        OutputFormat::Sqlite => Box::new(SqliteOutput::new(&config.path)),
    }
}

/// Writes a report using the configured format
///
/// # Arguments
///
/// * `report` - The final report of the run
/// * `config` - Output destination and format
pub fn write_report(report: &CrawlReport, config: &OutputConfig) -> OutputResult<()> {
    handler_for(config).write(report)
}
