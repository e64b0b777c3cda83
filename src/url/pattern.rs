use regex::{Regex, RegexBuilder};
use std::fmt;

/// A URL path pattern anchored on path-segment boundaries
///
/// The pattern source is a regular expression over the URL path. A match
/// must start at a `/` (or the start of the path) and end at a `/` or the
/// end of the path, so a pattern never matches inside a segment:
///
/// * `/video/` matches `/a1/video/x` but not `/videos/x` or `/myvideo/`
/// * `/[^/]+/video/[^/]+` matches `/a1/video/clip-name`
///
/// Matching is case-insensitive.
///
/// # Examples
///
/// ```
/// use crawli::url::PathPattern;
///
/// let pattern = PathPattern::new("/playlist/").unwrap();
/// assert!(pattern.is_match("/playlist/p1"));
/// assert!(pattern.is_match("/PlayList"));
/// assert!(!pattern.is_match("/playlists/p1"));
/// ```
#[derive(Clone)]
pub struct PathPattern {
    source: String,
    regex: Regex,
}

impl PathPattern {
    /// Compiles a pattern
    ///
    /// A trailing `/` in the source is folded into the segment-end anchor.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        let source = pattern.trim();
        let body = source.strip_suffix('/').unwrap_or(source);
        let start = if body.starts_with('/') { "" } else { "(?:^|/)" };
        let anchored = format!("{}(?:{})(?:/|$)", start, body);

        let regex = RegexBuilder::new(&anchored)
            .case_insensitive(true)
            .build()?;

        Ok(Self {
            source: source.to_string(),
            regex,
        })
    }

    /// Returns true if the pattern matches the given URL path
    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    /// The pattern as written in the configuration
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl fmt::Debug for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PathPattern").field(&self.source).finish()
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
