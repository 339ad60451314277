//! Multi-threaded query engine.
//!
//! Each query line becomes one work queue task. The cache is locked only
//! to reserve a canonical query and to store its results; the search in
//! between runs against the index's own read lock. A query that is
//! cached or in flight is skipped, so duplicates are computed exactly
//! once even when they arrive at the same time.

use parking_lot::Mutex;
use std::collections::{BTreeMap, HashSet};
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::core::error::Result;
use crate::core::index::{json, IndexReader, SearchResult};
use crate::core::query::{canonical_query, QueryHandler};
use crate::core::queue::WorkQueue;
use crate::core::text::TextAnalyzer;

#[derive(Default)]
struct CacheState {
    results: BTreeMap<String, Vec<SearchResult>>,
    in_flight: HashSet<String>,
}

/// Results cache shared by query tasks
#[derive(Default)]
struct QueryCache {
    state: Mutex<CacheState>,
    searches: AtomicUsize,
}

impl QueryCache {
    /// Claim `key` for computation; `false` if cached or in flight
    fn reserve(&self, key: &str) -> bool {
        let mut state = self.state.lock();
        if state.results.contains_key(key) || state.in_flight.contains(key) {
            return false;
        }
        state.in_flight.insert(key.to_string())
    }

    fn store(&self, key: String, ranked: Vec<SearchResult>) {
        let mut state = self.state.lock();
        state.in_flight.remove(&key);
        state.results.insert(key, ranked);
    }
}

/// Claim on a canonical query, released on drop if no results were stored
struct Reservation<'c> {
    cache: &'c QueryCache,
    key: Option<String>,
}

impl<'c> Reservation<'c> {
    fn claim(cache: &'c QueryCache, key: String) -> Option<Self> {
        if !cache.reserve(&key) {
            return None;
        }
        Some(Self {
            cache,
            key: Some(key),
        })
    }

    fn complete(mut self, ranked: Vec<SearchResult>) {
        if let Some(key) = self.key.take() {
            self.cache.store(key, ranked);
        }
    }
}

impl Drop for Reservation<'_> {
    fn drop(&mut self) {
        if let Some(key) = self.key.take() {
            self.cache.state.lock().in_flight.remove(&key);
        }
    }
}

/// Runs query lines in parallel on a work queue
pub struct ThreadedQueryEngine<'q, R: IndexReader + 'static> {
    index: Arc<R>,
    analyzer: TextAnalyzer,
    queue: &'q WorkQueue,
    cache: Arc<QueryCache>,
}

impl<'q, R: IndexReader + 'static> ThreadedQueryEngine<'q, R> {
    pub fn new(index: Arc<R>, analyzer: TextAnalyzer, queue: &'q WorkQueue) -> Self {
        Self {
            index,
            analyzer,
            queue,
            cache: Arc::new(QueryCache::default()),
        }
    }

    /// Cached results of one canonical query
    pub fn get(&self, query: &str) -> Option<Vec<SearchResult>> {
        self.cache.state.lock().results.get(query).cloned()
    }
}

impl<R: IndexReader + 'static> QueryHandler for ThreadedQueryEngine<'_, R> {
    fn handle_query(&mut self, line: &str, partial: bool) {
        let line = line.to_string();
        let index = Arc::clone(&self.index);
        let analyzer = self.analyzer.clone();
        let cache = Arc::clone(&self.cache);

        self.queue.submit(move || {
            let Some((key, terms)) = canonical_query(&analyzer, &line) else {
                return;
            };
            let Some(reservation) = Reservation::claim(&cache, key.clone()) else {
                tracing::debug!("Query '{}' already cached or running", key);
                return;
            };

            let ranked = index.search(&terms, partial);
            cache.searches.fetch_add(1, Ordering::Relaxed);
            tracing::debug!("Query '{}' matched {} documents", key, ranked.len());
            reservation.complete(ranked);
        });
    }

    fn finish(&mut self) -> Result<()> {
        self.queue.wait_idle()
    }

    fn results(&self) -> BTreeMap<String, Vec<SearchResult>> {
        self.cache.state.lock().results.clone()
    }

    fn num_queries(&self) -> usize {
        self.cache.state.lock().results.len()
    }

    fn searches_run(&self) -> usize {
        self.cache.searches.load(Ordering::Relaxed)
    }

    fn write_results_json(&self, writer: &mut dyn Write) -> Result<()> {
        let state = self.cache.state.lock();
        json::write_results(&state.results, writer)
    }
}
