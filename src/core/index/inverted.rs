//! Plain (single-threaded) inverted index.
//!
//! Maps each stemmed word to the documents it appears in, and each
//! document to the sorted set of 1-based positions where the word occurs.
//! A second map keeps the highest position seen per document, which is
//! used as the document's token count when scoring.
//!
//! Both maps are ordered. Sorted words let partial search scan only the
//! range of keys sharing a prefix; sorted documents and positions make
//! the JSON export deterministic.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::io::Write;
use std::ops::Bound;

use crate::core::error::Result;
use crate::core::index::json;
use crate::core::index::{IndexReader, SearchResult};

type Postings = BTreeMap<String, BTreeSet<usize>>;

/// Word → document → positions index with per-document token counts
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InvertedIndex {
    index: BTreeMap<String, Postings>,
    counts: BTreeMap<String, usize>,
}

impl InvertedIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `word` at `position` in `document`
    ///
    /// Adding the same triple twice is harmless. The document's token
    /// count grows to `position` if it was lower.
    pub fn add(&mut self, word: &str, document: &str, position: usize) {
        self.index
            .entry(word.to_string())
            .or_default()
            .entry(document.to_string())
            .or_default()
            .insert(position);

        self.raise_count(document, position);
    }

    /// Record a sequence of words at consecutive positions from `start`
    ///
    /// Returns the position after the last word added.
    pub fn add_words<I, S>(&mut self, words: I, document: &str, start: usize) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut position = start;
        for word in words {
            self.add(word.as_ref(), document, position);
            position += 1;
        }
        position
    }

    /// Merge another index into this one
    ///
    /// Documents and positions are unioned per word and token counts take
    /// the per-document maximum. Words or documents this index has never
    /// seen are moved over whole rather than copied.
    pub fn add_all(&mut self, other: InvertedIndex) {
        for (word, other_postings) in other.index {
            match self.index.get_mut(&word) {
                Some(postings) => {
                    for (document, positions) in other_postings {
                        match postings.get_mut(&document) {
                            Some(existing) => existing.extend(positions),
                            None => {
                                postings.insert(document, positions);
                            }
                        }
                    }
                }
                None => {
                    self.index.insert(word, other_postings);
                }
            }
        }

        for (document, count) in other.counts {
            self.raise_count_owned(document, count);
        }
    }

    fn raise_count(&mut self, document: &str, position: usize) {
        match self.counts.get_mut(document) {
            Some(count) => *count = (*count).max(position),
            None => {
                self.counts.insert(document.to_string(), position);
            }
        }
    }

    fn raise_count_owned(&mut self, document: String, position: usize) {
        let count = self.counts.entry(document).or_insert(position);
        *count = (*count).max(position);
    }

    /// All indexed words, in sorted order
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.index.keys().map(String::as_str)
    }

    /// Documents containing `word`, in sorted order
    pub fn documents(&self, word: &str) -> impl Iterator<Item = &str> {
        self.index
            .get(word)
            .into_iter()
            .flat_map(|postings| postings.keys().map(String::as_str))
    }

    /// Positions of `word` in `document`, in ascending order
    pub fn positions(&self, word: &str, document: &str) -> impl Iterator<Item = usize> + '_ {
        self.index
            .get(word)
            .and_then(|postings| postings.get(document))
            .into_iter()
            .flat_map(|positions| positions.iter().copied())
    }

    /// Read-only view of every document's token count
    pub fn token_counts(&self) -> &BTreeMap<String, usize> {
        &self.counts
    }

    /// Number of positions of `word` in `document`
    pub fn num_positions(&self, word: &str, document: &str) -> usize {
        self.index
            .get(word)
            .and_then(|postings| postings.get(document))
            .map_or(0, BTreeSet::len)
    }

    /// Whether nothing has been indexed
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Add every document of `postings` to the per-query matches
    fn collect_matches(&self, postings: &Postings, matches: &mut HashMap<String, SearchResult>) {
        for (document, positions) in postings {
            match matches.get_mut(document) {
                Some(result) => result.add_matches(positions.len()),
                None => {
                    let token_count = self.counts.get(document).copied().unwrap_or(0);
                    let mut result = SearchResult::new(document.clone(), token_count);
                    result.add_matches(positions.len());
                    matches.insert(document.clone(), result);
                }
            }
        }
    }

    fn rank(matches: HashMap<String, SearchResult>) -> Vec<SearchResult> {
        let mut results: Vec<SearchResult> = matches.into_values().collect();
        results.sort();
        results
    }
}

impl IndexReader for InvertedIndex {
    fn num_words(&self) -> usize {
        self.index.len()
    }

    fn num_documents(&self, word: &str) -> usize {
        self.index.get(word).map_or(0, BTreeMap::len)
    }

    fn token_count(&self, document: &str) -> Option<usize> {
        self.counts.get(document).copied()
    }

    fn num_counted_documents(&self) -> usize {
        self.counts.len()
    }

    fn contains_word(&self, word: &str) -> bool {
        self.index.contains_key(word)
    }

    fn contains_document(&self, word: &str, document: &str) -> bool {
        self.index
            .get(word)
            .is_some_and(|postings| postings.contains_key(document))
    }

    fn contains(&self, word: &str, document: &str, position: usize) -> bool {
        self.index
            .get(word)
            .and_then(|postings| postings.get(document))
            .is_some_and(|positions| positions.contains(&position))
    }

    fn exact_search(&self, terms: &BTreeSet<String>) -> Vec<SearchResult> {
        let mut matches = HashMap::new();

        for term in terms {
            if let Some(postings) = self.index.get(term) {
                self.collect_matches(postings, &mut matches);
            }
        }

        Self::rank(matches)
    }

    fn partial_search(&self, terms: &BTreeSet<String>) -> Vec<SearchResult> {
        let mut matches = HashMap::new();

        for term in terms {
            // Keys sharing the prefix are contiguous starting at the term itself
            for (word, postings) in self
                .index
                .range::<str, _>((Bound::Included(term.as_str()), Bound::Unbounded))
            {
                if !word.starts_with(term.as_str()) {
                    break;
                }
                self.collect_matches(postings, &mut matches);
            }
        }

        Self::rank(matches)
    }

    fn write_index_json(&self, writer: &mut dyn Write) -> Result<()> {
        json::write_index(&self.index, writer)
    }

    fn write_counts_json(&self, writer: &mut dyn Write) -> Result<()> {
        json::write_counts(self.token_counts(), writer)
    }
}

impl fmt::Display for InvertedIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "InvertedIndex({} words, {} documents)",
            self.index.len(),
            self.counts.len()
        )
    }
}
