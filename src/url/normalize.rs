use url::Url;

/// Produces the canonical string form used for deduplication
///
/// # Normalization Steps
///
/// 1. Scheme and host are already lowercased by the parser
/// 2. Default ports are already dropped by the parser
/// 3. Remove the fragment (same document, different anchor)
/// 4. Remove an empty query string (trailing `?`)
///
/// Path case and query parameters are preserved: they are significant on
/// most sites.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use crawli::url::canonicalize;
///
/// let url = Url::parse("HTTPS://Example.COM:443/a1/video/x?#comments").unwrap();
/// assert_eq!(canonicalize(&url), "https://example.com/a1/video/x");
/// ```
pub fn canonicalize(url: &Url) -> String {
    let mut url = url.clone();
    url.set_fragment(None);

    if url.query() == Some("") {
        url.set_query(None);
    }

    url.to_string()
}

/// Checks whether `candidate` lies within the crawl scope rooted at `base`
///
/// A URL is in scope when it has the same origin (scheme, host, port) as the
/// base URL and its path is the base path or below it. Path containment is
/// segment-aware: a base of `/videos` covers `/videos/x` but not
/// `/videos-old`.
pub fn is_in_scope(base: &Url, candidate: &Url) -> bool {
    if candidate.scheme() != "http" && candidate.scheme() != "https" {
        return false;
    }

    if candidate.origin() != base.origin() {
        return false;
    }

    let base_path = base.path().trim_end_matches('/');
    if base_path.is_empty() {
        return true;
    }

    let path = candidate.path();
    path == base_path
        || path
            .strip_prefix(base_path)
            .is_some_and(|rest| rest.starts_with('/'))
}
