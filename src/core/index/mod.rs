//! Inverted index and its thread-safe guard.
//!
//! - **inverted**: the plain word → document → positions index
//! - **concurrent**: read/write-lock guard that owns an inverted index
//! - **result**: ranked, self-contained search results
//! - **json**: pretty JSON exports of the index, counts and query results
//!
//! Consumers that only read (query engines, exports) are written against
//! the `IndexReader` trait so they work with either implementation.

pub mod concurrent;
pub mod inverted;
pub mod json;
pub mod result;

pub use concurrent::ConcurrentIndex;
pub use inverted::InvertedIndex;
pub use result::SearchResult;

use crate::core::error::Result;
use std::collections::BTreeSet;
use std::io::Write;
use std::path::Path;

/// Read-side operations shared by the plain index and its guard
pub trait IndexReader: Send + Sync {
    /// Number of distinct words
    fn num_words(&self) -> usize;

    /// Number of documents containing `word`
    fn num_documents(&self, word: &str) -> usize;

    /// Token count of a document, if it was ever indexed
    fn token_count(&self, document: &str) -> Option<usize>;

    /// Number of documents with a token count
    fn num_counted_documents(&self) -> usize;

    /// Whether `word` appears anywhere
    fn contains_word(&self, word: &str) -> bool;

    /// Whether `word` appears in `document`
    fn contains_document(&self, word: &str, document: &str) -> bool;

    /// Whether `word` appears in `document` at `position`
    fn contains(&self, word: &str, document: &str, position: usize) -> bool;

    /// Rank documents containing a word equal to one of `terms`
    fn exact_search(&self, terms: &BTreeSet<String>) -> Vec<SearchResult>;

    /// Rank documents containing a word starting with one of `terms`
    fn partial_search(&self, terms: &BTreeSet<String>) -> Vec<SearchResult>;

    /// Run a partial or exact search
    fn search(&self, terms: &BTreeSet<String>, partial: bool) -> Vec<SearchResult> {
        if partial {
            self.partial_search(terms)
        } else {
            self.exact_search(terms)
        }
    }

    /// Write the index as pretty JSON
    fn write_index_json(&self, writer: &mut dyn Write) -> Result<()>;

    /// Write the per-document token counts as pretty JSON
    fn write_counts_json(&self, writer: &mut dyn Write) -> Result<()>;

    /// Write the index as pretty JSON to a file
    fn write_index(&self, path: &Path) -> Result<()> {
        json::write_to_path(path, |writer| self.write_index_json(writer))
    }

    /// Write the per-document token counts as pretty JSON to a file
    fn write_counts(&self, path: &Path) -> Result<()> {
        json::write_to_path(path, |writer| self.write_counts_json(writer))
    }
}
