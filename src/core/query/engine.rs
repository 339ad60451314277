//! Single-threaded query engine.

use std::collections::BTreeMap;
use std::io::Write;

use crate::core::error::Result;
use crate::core::index::{json, IndexReader, SearchResult};
use crate::core::query::{canonical_query, QueryHandler};
use crate::core::text::TextAnalyzer;

/// Runs queries on the calling thread and caches their results
pub struct QueryEngine<'a, R: IndexReader + ?Sized> {
    index: &'a R,
    analyzer: TextAnalyzer,
    results: BTreeMap<String, Vec<SearchResult>>,
    searches: usize,
}

impl<'a, R: IndexReader + ?Sized> QueryEngine<'a, R> {
    pub fn new(index: &'a R, analyzer: TextAnalyzer) -> Self {
        Self {
            index,
            analyzer,
            results: BTreeMap::new(),
            searches: 0,
        }
    }

    /// Cached results of one canonical query
    pub fn get(&self, query: &str) -> Option<&[SearchResult]> {
        self.results.get(query).map(Vec::as_slice)
    }
}

impl<R: IndexReader + ?Sized> QueryHandler for QueryEngine<'_, R> {
    fn handle_query(&mut self, line: &str, partial: bool) {
        let Some((key, terms)) = canonical_query(&self.analyzer, line) else {
            return;
        };
        if self.results.contains_key(&key) {
            tracing::debug!("Query '{}' already cached", key);
            return;
        }

        let ranked = self.index.search(&terms, partial);
        self.searches += 1;
        tracing::debug!("Query '{}' matched {} documents", key, ranked.len());
        self.results.insert(key, ranked);
    }

    fn finish(&mut self) -> Result<()> {
        Ok(())
    }

    fn results(&self) -> BTreeMap<String, Vec<SearchResult>> {
        self.results.clone()
    }

    fn num_queries(&self) -> usize {
        self.results.len()
    }

    fn searches_run(&self) -> usize {
        self.searches
    }

    fn write_results_json(&self, writer: &mut dyn Write) -> Result<()> {
        json::write_results(&self.results, writer)
    }
}
