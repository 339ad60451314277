//! Ranked search results.

use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

/// One document matched by a query
///
/// A self-contained value: the document's token count is captured when
/// the result is created, so a result never reads back into the index
/// that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    /// Document identifier (file path or URL)
    pub document: String,

    /// Number of positions of all matched words in the document
    pub count: usize,

    /// Total number of tokens in the document
    pub token_count: usize,
}

impl SearchResult {
    /// Create an empty result for a document of `token_count` tokens
    pub fn new(document: impl Into<String>, token_count: usize) -> Self {
        Self {
            document: document.into(),
            count: 0,
            token_count,
        }
    }

    /// Account for `matches` more positions of a matched word
    pub fn add_matches(&mut self, matches: usize) {
        self.count += matches;
    }

    /// Fraction of the document's tokens that matched the query
    pub fn score(&self) -> f64 {
        if self.token_count == 0 {
            return 0.0;
        }
        self.count as f64 / self.token_count as f64
    }
}

impl Ord for SearchResult {
    /// Score descending, then count descending, then document ascending
    /// ignoring case
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .score()
            .total_cmp(&self.score())
            .then_with(|| other.count.cmp(&self.count))
            .then_with(|| {
                self.document
                    .to_lowercase()
                    .cmp(&other.document.to_lowercase())
            })
            .then_with(|| self.document.cmp(&other.document))
    }
}

impl PartialOrd for SearchResult {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for SearchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (count: {}, score: {:.8})",
            self.document,
            self.count,
            self.score()
        )
    }
}
