use crate::config::types::{Config, CrawlerConfig, HttpConfig, OutputConfig, TargetConfig};
use crate::url::{is_in_scope, PathPattern};
use crate::ConfigError;
use reqwest::header::HeaderValue;
use url::Url;

/// Upper bound on attempts per URL
const MAX_RETRIES_LIMIT: u32 = 10;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_target_config(&config.target)?;
    validate_crawler_config(&config.crawler)?;
    validate_http_config(&config.http)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates the crawl target: URLs and patterns
fn validate_target_config(config: &TargetConfig) -> Result<(), ConfigError> {
    let base = parse_http_url("base_url", &config.base_url)?;
    let seed = parse_http_url("seed_url", config.seed())?;

    if !is_in_scope(&base, &seed) {
        return Err(ConfigError::Validation(format!(
            "seed_url '{}' is outside of base_url '{}'",
            seed, base
        )));
    }

    compile_pattern(&config.target_pattern)?;
    for pattern in &config.ignore_patterns {
        compile_pattern(pattern)?;
    }

    Ok(())
}

/// Validates crawler limits and timing
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max_pages must be >= 1, got {}",
            config.max_pages
        )));
    }

    if config.max_retries < 1 || config.max_retries > MAX_RETRIES_LIMIT {
        return Err(ConfigError::Validation(format!(
            "max_retries must be between 1 and {}, got {}",
            MAX_RETRIES_LIMIT, config.max_retries
        )));
    }

    if config.fetch_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "fetch_timeout_secs must be >= 1, got {}",
            config.fetch_timeout_secs
        )));
    }

    if config.backoff.min_ms > config.backoff.max_ms {
        return Err(ConfigError::Validation(format!(
            "backoff min_ms ({}) must not exceed max_ms ({})",
            config.backoff.min_ms, config.backoff.max_ms
        )));
    }

    Ok(())
}

/// Validates the HTTP client identity
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    for (field, value) in [
        ("user_agent", &config.user_agent),
        ("accept_language", &config.accept_language),
    ] {
        if HeaderValue::from_str(value).is_err() {
            return Err(ConfigError::Validation(format!(
                "{} is not a valid HTTP header value: {:?}",
                field, value
            )));
        }
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.path.trim().is_empty() {
        return Err(ConfigError::Validation(
            "output path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Parses a URL that must use the HTTP or HTTPS scheme and carry a host
pub(crate) fn parse_http_url(field: &str, value: &str) -> Result<Url, ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::InvalidUrl(format!("{} cannot be empty", field)));
    }

    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} '{}': {}", field, value, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "{} '{}' must use HTTP or HTTPS",
            field, value
        )));
    }

    if url.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!(
            "{} '{}' has no host",
            field, value
        )));
    }

    Ok(url)
}

/// Compiles a path pattern, rejecting empty ones
pub(crate) fn compile_pattern(pattern: &str) -> Result<PathPattern, ConfigError> {
    if pattern.trim().is_empty() {
        return Err(ConfigError::Validation(
            "path patterns cannot be empty".to_string(),
        ));
    }

    PathPattern::new(pattern).map_err(|source| ConfigError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}
