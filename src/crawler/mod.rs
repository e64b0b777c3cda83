//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with retry and exponential backoff
//! - HTML parsing and link extraction
//! - The FIFO frontier and request pacing
//! - Overall crawl coordination and cancellation

mod coordinator;
mod fetcher;
mod frontier;
mod gateway;
mod pacer;
mod parser;
mod retry;

pub use coordinator::{Coordinator, CrawlState};
pub use fetcher::{build_http_client, HttpFetch, HttpResponse, ReqwestFetcher, TransportError};
pub use frontier::Frontier;
pub use gateway::{FetchGateway, FetchOutcome};
pub use pacer::Pacer;
pub use parser::{HtmlLinkExtractor, LinkExtractor};
pub use retry::RetryPolicy;

use crate::config::Config;
use crate::output::CrawlReport;
use crate::CrawliError;
use tokio_util::sync::CancellationToken;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Resolve the crawl target from the configuration
/// 2. Build the HTTP client
/// 3. Crawl breadth-first from the seed URL
/// 4. Return the collected targets and run statistics
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `cancel` - Token that stops the crawl early when cancelled
///
/// # Returns
///
/// * `Ok(CrawlReport)` - Crawl completed or was aborted with partial results
/// * `Err(CrawliError)` - Crawl could not be started
pub async fn crawl(config: &Config, cancel: CancellationToken) -> Result<CrawlReport, CrawliError> {
    let mut coordinator = Coordinator::new(config)?;
    coordinator.run(cancel).await
}
