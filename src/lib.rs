//! Crawli: a single-domain target URL discoverer
//!
//! This crate walks the internal link graph of one site starting from a seed
//! page, classifies every discovered link against a target path pattern, and
//! reports the set of matching URLs together with run statistics.

pub mod config;
pub mod crawler;
pub mod output;
pub mod url;

use thiserror::Error;

/// Main error type for Crawli operations
#[derive(Debug, Error)]
pub enum CrawliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Crawl has already been started; a new run needs a new coordinator")]
    AlreadyStarted,
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid path pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },
}

/// Result type alias for Crawli operations
pub type Result<T> = std::result::Result<T, CrawliError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::{Config, CrawlTarget};
pub use crawler::{Coordinator, CrawlState};
pub use output::{CrawlReport, RunStats};
pub use url::{classify, Classification, PathPattern};
