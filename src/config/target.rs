use crate::config::types::Config;
use crate::config::validation::{compile_pattern, parse_http_url, validate};
use crate::crawler::RetryPolicy;
use crate::url::PathPattern;
use crate::ConfigError;
use std::time::Duration;
use url::Url;

/// Immutable description of one crawl run
///
/// Built once from a validated [`Config`] before the run starts and never
/// mutated afterwards.
#[derive(Debug, Clone)]
pub struct CrawlTarget {
    /// Scope of the crawl: same origin, path under this URL's path
    pub base_url: Url,

    /// The single URL the frontier is seeded with
    pub seed_url: Url,

    /// Pattern identifying target URLs
    pub target_pattern: PathPattern,

    /// Patterns for URLs that are neither fetched nor reported
    pub ignore_patterns: Vec<PathPattern>,

    /// Page budget of the run
    pub max_pages: u32,

    /// Politeness delay between two consecutive fetches
    pub request_delay: Duration,

    /// Timeout of a single fetch attempt
    pub fetch_timeout: Duration,

    /// Attempts and backoff schedule per URL
    pub retry: RetryPolicy,
}

impl CrawlTarget {
    /// Builds a crawl target from configuration
    ///
    /// The configuration is validated again so a target can never be built
    /// from settings that were edited after loading (e.g. CLI overrides).
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        validate(config)?;

        let base_url = parse_http_url("base_url", &config.target.base_url)?;
        let seed_url = parse_http_url("seed_url", config.target.seed())?;
        let target_pattern = compile_pattern(&config.target.target_pattern)?;
        let ignore_patterns = config
            .target
            .ignore_patterns
            .iter()
            .map(|p| compile_pattern(p))
            .collect::<Result<Vec<_>, _>>()?;

        let crawler = &config.crawler;
        let retry = RetryPolicy {
            max_attempts: crawler.max_retries,
            multiplier: Duration::from_millis(crawler.backoff.multiplier_ms),
            min_backoff: Duration::from_millis(crawler.backoff.min_ms),
            max_backoff: Duration::from_millis(crawler.backoff.max_ms),
        };

        Ok(Self {
            base_url,
            seed_url,
            target_pattern,
            ignore_patterns,
            max_pages: crawler.max_pages,
            request_delay: Duration::from_millis(crawler.request_delay_ms),
            fetch_timeout: Duration::from_secs(crawler.fetch_timeout_secs),
            retry,
        })
    }
}
