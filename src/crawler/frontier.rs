//! Crawl frontier: FIFO queue of URLs still to visit
//!
//! The frontier remembers every URL it has ever accepted, so a URL can sit in
//! the pending queue at most once per run and is never re-enqueued after it
//! has been popped. FIFO order makes the traversal breadth-first and
//! reproducible for a deterministic link order.

use std::collections::{HashSet, VecDeque};

/// Ordered work queue plus the set of URLs enqueued-or-visited
#[derive(Debug, Default)]
pub struct Frontier {
    /// URLs waiting to be fetched, oldest first
    pending: VecDeque<String>,

    /// Every URL ever pushed (pending or already popped)
    seen: HashSet<String>,
}

impl Frontier {
    /// Creates an empty frontier
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueues a URL unless it was ever enqueued before
    ///
    /// Returns true if the URL was added.
    pub fn push(&mut self, url: impl Into<String>) -> bool {
        let url = url.into();
        if self.seen.contains(&url) {
            tracing::trace!("Frontier already knows {}", url);
            return false;
        }

        tracing::trace!("Frontier push: {}", url);
        self.seen.insert(url.clone());
        self.pending.push_back(url);
        true
    }

    /// Removes and returns the earliest-inserted pending URL
    pub fn pop(&mut self) -> Option<String> {
        self.pending.pop_front()
    }

    /// Returns true if the URL is pending or was already popped
    pub fn contains(&self, url: &str) -> bool {
        self.seen.contains(url)
    }

    /// Number of pending URLs
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Returns whether nothing is pending
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Number of distinct URLs ever enqueued
    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }
}
