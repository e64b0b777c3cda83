//! Configuration module for Crawli
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files, and turns a validated configuration into the immutable
//! [`CrawlTarget`] a run is driven by.
//!
//! # Example
//!
//! ```no_run
//! use crawli::config::{load_config, CrawlTarget};
//! use std::path::Path;
//!
//! let config = load_config(Path::new("crawli.toml")).unwrap();
//! let target = CrawlTarget::from_config(&config).unwrap();
//! println!("Crawling {} for up to {} pages", target.base_url, target.max_pages);
//! ```

mod parser;
mod target;
mod types;
mod validation;

// Re-export types
pub use target::CrawlTarget;
pub use types::{
    BackoffConfig, Config, CrawlerConfig, HttpConfig, OutputConfig, OutputFormat, TargetConfig,
    DEFAULT_USER_AGENT,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
