use serde::Deserialize;

/// Browser-like user agent sent when the config does not override it
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Main configuration structure for Crawli
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub target: TargetConfig,
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub http: HttpConfig,
    pub output: OutputConfig,
}

/// What to crawl and what to look for
#[derive(Debug, Clone, Deserialize)]
pub struct TargetConfig {
    /// Base URL; only links under this origin and path are in scope
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// First page to fetch (defaults to the base URL)
    #[serde(rename = "seed-url", default)]
    pub seed_url: Option<String>,

    /// Path pattern identifying target URLs (e.g. "/[^/]+/video/[^/]+")
    #[serde(rename = "target-pattern")]
    pub target_pattern: String,

    /// Path patterns that are never fetched nor reported
    #[serde(rename = "ignore-patterns", default)]
    pub ignore_patterns: Vec<String>,
}

impl TargetConfig {
    /// Returns the seed URL, falling back to the base URL
    pub fn seed(&self) -> &str {
        self.seed_url.as_deref().unwrap_or(&self.base_url)
    }
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Maximum number of pages to fetch in one run
    #[serde(rename = "max-pages")]
    pub max_pages: u32,

    /// Minimum time between two consecutive requests (milliseconds)
    #[serde(rename = "request-delay-ms")]
    pub request_delay_ms: u64,

    /// Timeout of a single fetch attempt (seconds)
    #[serde(rename = "fetch-timeout-secs")]
    pub fetch_timeout_secs: u64,

    /// Maximum number of attempts per URL
    #[serde(rename = "max-retries")]
    pub max_retries: u32,

    /// Wait schedule between attempts
    #[serde(default)]
    pub backoff: BackoffConfig,
}

/// Exponential backoff schedule between fetch attempts
#[derive(Debug, Clone, Deserialize)]
pub struct BackoffConfig {
    /// Base unit that is doubled on every attempt (milliseconds)
    #[serde(rename = "multiplier-ms", default = "default_multiplier_ms")]
    pub multiplier_ms: u64,

    /// Lower bound of a single wait (milliseconds)
    #[serde(rename = "min-ms", default = "default_min_ms")]
    pub min_ms: u64,

    /// Upper bound of a single wait (milliseconds)
    #[serde(rename = "max-ms", default = "default_max_ms")]
    pub max_ms: u64,
}

fn default_multiplier_ms() -> u64 {
    1_000
}

fn default_min_ms() -> u64 {
    4_000
}

fn default_max_ms() -> u64 {
    10_000
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            multiplier_ms: default_multiplier_ms(),
            min_ms: default_min_ms(),
            max_ms: default_max_ms(),
        }
    }
}

/// HTTP client identity
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    #[serde(rename = "accept-language", default = "default_accept_language")]
    pub accept_language: String,
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_accept_language() -> String {
    "en-US,en;q=0.9".to_string()
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            accept_language: default_accept_language(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Destination file of the final report
    pub path: String,

    /// Report format
    #[serde(default)]
    pub format: OutputFormat,
}

/// Supported report formats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Sorted newline-delimited URLs with a trailing count line
    #[default]
    Txt,
    /// Targets and run statistics as a JSON document
    Json,
    /// `runs` and `targets` tables in a SQLite database
    Sqlite,
}
