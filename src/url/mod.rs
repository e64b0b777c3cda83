//! URL handling module for Crawli
//!
//! This module provides URL canonicalization, crawl-scope checks,
//! segment-anchored path patterns, and URL classification.

mod normalize;
mod pattern;

use crate::config::CrawlTarget;
use url::Url;

// Re-export main functions
pub use normalize::{canonicalize, is_in_scope};
pub use pattern::PathPattern;

/// Outcome of classifying a URL against a crawl target
///
/// Every variant carries the URL in canonical form (see [`canonicalize`]),
/// except `OutOfScope` for unparseable input, which carries it verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Classification {
    /// Matches the target pattern - reported, never fetched
    Target(String),
    /// Matches an ignore pattern - dropped
    Ignored(String),
    /// In scope but not a target - fetched to discover more links
    Followable(String),
    /// Different origin, outside the base path, or malformed - dropped
    OutOfScope(String),
}

impl Classification {
    /// The URL this classification is about
    pub fn url(&self) -> &str {
        match self {
            Self::Target(url)
            | Self::Ignored(url)
            | Self::Followable(url)
            | Self::OutOfScope(url) => url,
        }
    }

    /// Short lowercase label, used in logs
    pub fn label(&self) -> &'static str {
        match self {
            Self::Target(_) => "target",
            Self::Ignored(_) => "ignored",
            Self::Followable(_) => "followable",
            Self::OutOfScope(_) => "out-of-scope",
        }
    }
}

/// Classifies a URL according to the crawl target
///
/// Rules are checked in the following order, first match wins:
/// 1. Not parseable, not HTTP(S), or outside the base URL → `OutOfScope`
/// 2. Path matches any ignore pattern → `Ignored`
/// 3. Path matches the target pattern → `Target`
/// 4. Otherwise → `Followable`
///
/// The function is pure and total: it depends only on its arguments and
/// never fails.
///
/// # Examples
///
/// ```no_run
/// use crawli::config::CrawlTarget;
/// use crawli::url::{classify, Classification};
///
/// # fn example(target: &CrawlTarget) {
/// match classify("https://example.com/a1/video/x", target) {
///     Classification::Target(url) => println!("found {}", url),
///     Classification::Followable(url) => println!("will visit {}", url),
///     Classification::Ignored(_) | Classification::OutOfScope(_) => {}
/// }
/// # }
/// ```
pub fn classify(url: &str, target: &CrawlTarget) -> Classification {
    let parsed = match Url::parse(url.trim()) {
        Ok(parsed) => parsed,
        Err(_) => return Classification::OutOfScope(url.to_string()),
    };

    let canonical = canonicalize(&parsed);

    if !is_in_scope(&target.base_url, &parsed) {
        return Classification::OutOfScope(canonical);
    }

    let path = parsed.path();

    if target.ignore_patterns.iter().any(|p| p.is_match(path)) {
        return Classification::Ignored(canonical);
    }

    if target.target_pattern.is_match(path) {
        return Classification::Target(canonical);
    }

    Classification::Followable(canonical)
}
