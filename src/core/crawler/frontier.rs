//! Bounded, deduplicated crawl frontier.

use parking_lot::Mutex;
use reqwest::Url;
use std::collections::HashSet;

/// Set of normalized URLs already scheduled for fetching
///
/// Never holds more than `limit` URLs. Admission checks membership and
/// size and inserts in one lock acquisition, so two tasks can neither
/// admit the same URL nor jointly exceed the limit.
#[derive(Debug)]
pub struct Frontier {
    seen: Mutex<HashSet<String>>,
    limit: usize,
}

impl Frontier {
    /// Create an empty frontier admitting at most `limit` URLs
    pub fn new(limit: usize) -> Self {
        Self {
            seen: Mutex::new(HashSet::new()),
            limit,
        }
    }

    /// Admit `url` if it is new and the limit is not reached
    ///
    /// Returns `true` when the caller should schedule a fetch.
    pub fn try_admit(&self, url: &Url) -> bool {
        let mut seen = self.seen.lock();
        if seen.len() >= self.limit || seen.contains(url.as_str()) {
            return false;
        }
        seen.insert(url.as_str().to_string())
    }

    /// Whether `url` was ever admitted
    pub fn contains(&self, url: &Url) -> bool {
        self.seen.lock().contains(url.as_str())
    }

    /// Number of admitted URLs
    pub fn len(&self) -> usize {
        self.seen.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.lock().is_empty()
    }

    /// Whether no more URLs can be admitted
    pub fn is_full(&self) -> bool {
        self.len() >= self.limit
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}
