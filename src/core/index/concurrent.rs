//! Thread-safe inverted index.
//!
//! `ConcurrentIndex` owns an `InvertedIndex` behind a read/write lock:
//! any number of readers at once, writers exclusive. Each public call is
//! one critical section, so a merge is applied atomically and a search
//! never observes a half-applied merge.
//!
//! Snapshot accessors return owned collections because a borrowed view
//! cannot outlive the read guard. Use `with_read` to inspect the index
//! in place without copying.

use parking_lot::RwLock;
use std::collections::BTreeSet;
use std::fmt;
use std::io::Write;

use crate::core::error::Result;
use crate::core::index::{IndexReader, InvertedIndex, SearchResult};

/// Inverted index guarded by a read/write lock
#[derive(Default)]
pub struct ConcurrentIndex {
    inner: RwLock<InvertedIndex>,
}

impl ConcurrentIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing index
    pub fn from_index(index: InvertedIndex) -> Self {
        Self {
            inner: RwLock::new(index),
        }
    }

    /// Record `word` at `position` in `document`
    pub fn add(&self, word: &str, document: &str, position: usize) {
        self.inner.write().add(word, document, position);
    }

    /// Merge a private index built elsewhere
    pub fn add_all(&self, other: InvertedIndex) {
        self.inner.write().add_all(other);
    }

    /// Run `f` with shared access to the underlying index
    pub fn with_read<T>(&self, f: impl FnOnce(&InvertedIndex) -> T) -> T {
        f(&self.inner.read())
    }

    /// Sorted snapshot of all words
    pub fn words(&self) -> Vec<String> {
        self.with_read(|index| index.words().map(str::to_string).collect())
    }

    /// Sorted snapshot of the documents containing `word`
    pub fn documents(&self, word: &str) -> Vec<String> {
        self.with_read(|index| index.documents(word).map(str::to_string).collect())
    }

    /// Sorted snapshot of the positions of `word` in `document`
    pub fn positions(&self, word: &str, document: &str) -> Vec<usize> {
        self.with_read(|index| index.positions(word, document).collect())
    }

    /// Number of positions of `word` in `document`
    pub fn num_positions(&self, word: &str, document: &str) -> usize {
        self.with_read(|index| index.num_positions(word, document))
    }

    /// Whether nothing has been indexed
    pub fn is_empty(&self) -> bool {
        self.with_read(InvertedIndex::is_empty)
    }

    /// Take the index out of the lock
    pub fn into_inner(self) -> InvertedIndex {
        self.inner.into_inner()
    }
}

impl IndexReader for ConcurrentIndex {
    fn num_words(&self) -> usize {
        self.inner.read().num_words()
    }

    fn num_documents(&self, word: &str) -> usize {
        self.inner.read().num_documents(word)
    }

    fn token_count(&self, document: &str) -> Option<usize> {
        self.inner.read().token_count(document)
    }

    fn num_counted_documents(&self) -> usize {
        self.inner.read().num_counted_documents()
    }

    fn contains_word(&self, word: &str) -> bool {
        self.inner.read().contains_word(word)
    }

    fn contains_document(&self, word: &str, document: &str) -> bool {
        self.inner.read().contains_document(word, document)
    }

    fn contains(&self, word: &str, document: &str, position: usize) -> bool {
        self.inner.read().contains(word, document, position)
    }

    fn exact_search(&self, terms: &BTreeSet<String>) -> Vec<SearchResult> {
        self.inner.read().exact_search(terms)
    }

    fn partial_search(&self, terms: &BTreeSet<String>) -> Vec<SearchResult> {
        self.inner.read().partial_search(terms)
    }

    fn write_index_json(&self, writer: &mut dyn Write) -> Result<()> {
        self.inner.read().write_index_json(writer)
    }

    fn write_counts_json(&self, writer: &mut dyn Write) -> Result<()> {
        self.inner.read().write_counts_json(writer)
    }
}

impl fmt::Debug for ConcurrentIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConcurrentIndex")
            .field("inner", &*self.inner.read())
            .finish()
    }
}

impl fmt::Display for ConcurrentIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.inner.read(), f)
    }
}
