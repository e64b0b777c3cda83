//! HTML link extraction
//!
//! This module turns a fetched page body into the list of absolute URLs it
//! links to. The crawl loop only depends on the [`LinkExtractor`] trait;
//! [`HtmlLinkExtractor`] is the default scraper-based implementation.

use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Extracts absolute link targets from a page body
pub trait LinkExtractor: Send + Sync {
    /// Returns the absolute URLs found in `body`, resolved against `page_url`
    ///
    /// The result is deduplicated and in document order, so repeated runs
    /// over the same page discover links in the same order.
    fn extract_links(&self, body: &str, page_url: &Url) -> Vec<String>;
}

/// scraper-based extractor for HTML pages
///
/// # Link Extraction Rules
///
/// **Include:**
/// - `<a href="...">` tags
/// - `<link rel="canonical" href="...">`
///
/// **Exclude:**
/// - `<a href="..." download>`
/// - `javascript:`, `mailto:`, `tel:` links
/// - Data URIs
/// - Fragment-only links (same page anchors)
/// - Anything that is not HTTP(S) after resolution
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlLinkExtractor;

impl LinkExtractor for HtmlLinkExtractor {
    fn extract_links(&self, body: &str, page_url: &Url) -> Vec<String> {
        let document = Html::parse_document(body);
        let mut seen = HashSet::new();
        let mut links = Vec::new();

        let mut push = |href: &str| {
            if let Some(absolute) = resolve_link(href, page_url) {
                if seen.insert(absolute.clone()) {
                    links.push(absolute);
                }
            }
        };

        if let Ok(a_selector) = Selector::parse("a[href]") {
            for element in document.select(&a_selector) {
                if element.value().attr("download").is_some() {
                    continue;
                }
                if let Some(href) = element.value().attr("href") {
                    push(href);
                }
            }
        }

        if let Ok(canonical_selector) = Selector::parse("link[rel='canonical'][href]") {
            for element in document.select(&canonical_selector) {
                if let Some(href) = element.value().attr("href") {
                    push(href);
                }
            }
        }

        links
    }
}

/// Resolves a link href to an absolute URL and validates it
///
/// Returns None if the link should be excluded.
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lowered = href.to_ascii_lowercase();
    if lowered.starts_with("javascript:")
        || lowered.starts_with("mailto:")
        || lowered.starts_with("tel:")
        || lowered.starts_with("data:")
    {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute_url) if matches!(absolute_url.scheme(), "http" | "https") => {
            Some(absolute_url.to_string())
        }
        Ok(_) => None,
        Err(e) => {
            tracing::debug!("Dropping unresolvable link {:?}: {}", href, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_url() -> Url {
        Url::parse("https://example.com/page").unwrap()
    }

    fn links(html: &str) -> Vec<String> {
        HtmlLinkExtractor.extract_links(html, &base_url())
    }

    #[test]
    fn test_extract_absolute_link() {
        let links = links(r#"<html><body><a href="https://other.com/page">Link</a></body></html>"#);
        assert_eq!(links, vec!["https://other.com/page"]);
    }

    #[test]
    fn test_extract_relative_link() {
        let links = links(r#"<html><body><a href="/a1/video/x">Link</a></body></html>"#);
        assert_eq!(links, vec!["https://example.com/a1/video/x"]);
    }

    #[test]
    fn test_extract_relative_path_link() {
        let links = links(r#"<html><body><a href="other">Link</a></body></html>"#);
        assert_eq!(links, vec!["https://example.com/other"]);
    }

    #[test]
    fn test_skip_special_schemes() {
        let links = links(
            r#"<html><body>
                <a href="javascript:void(0)">JS</a>
                <a href="JavaScript:alert(1)">JS</a>
                <a href="mailto:test@example.com">Email</a>
                <a href="tel:+1234567890">Call</a>
                <a href="data:text/html,<h1>Test</h1>">Data</a>
                <a href="ftp://example.com/file">FTP</a>
            </body></html>"#,
        );
        assert!(links.is_empty());
    }

    #[test]
    fn test_skip_download_link() {
        let links = links(r#"<html><body><a href="/file.pdf" download>Download</a></body></html>"#);
        assert!(links.is_empty());
    }

    #[test]
    fn test_skip_fragment_only() {
        let links = links(r##"<html><body><a href="#section">Jump</a></body></html>"##);
        assert!(links.is_empty());
    }

    #[test]
    fn test_extract_canonical_link() {
        let links = links(
            r#"<html><head><link rel="canonical" href="https://example.com/canonical" /></head><body></body></html>"#,
        );
        assert_eq!(links, vec!["https://example.com/canonical"]);
    }

    #[test]
    fn test_document_order_and_dedup() {
        let links = links(
            r#"
            <html>
            <body>
                <a href="/a1/video/x">Video</a>
                <a href="/playlist/p1">Playlist</a>
                <a href="/about">About</a>
                <a href="/a1/video/x">Video again</a>
            </body>
            </html>
        "#,
        );
        assert_eq!(
            links,
            vec![
                "https://example.com/a1/video/x",
                "https://example.com/playlist/p1",
                "https://example.com/about",
            ]
        );
    }

    #[test]
    fn test_not_html_yields_nothing() {
        assert!(links("just some plain text").is_empty());
    }
}
