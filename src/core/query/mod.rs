//! Query processing.
//!
//! Turns query lines into canonical term sets, runs them against an
//! index and caches the ranked results per canonical query. Two engines
//! share the `QueryHandler` interface:
//!
//! - `QueryEngine` runs each query on the calling thread
//! - `ThreadedQueryEngine` runs each query line as a work queue task
//!
//! A canonical query is the sorted set of unique stems of the line,
//! joined by single spaces. Lines without any stem are ignored.

pub mod engine;
pub mod threaded;

pub use engine::QueryEngine;
pub use threaded::ThreadedQueryEngine;

use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use crate::core::error::Result;
use crate::core::index::{json, SearchResult};
use crate::core::text::TextAnalyzer;

/// Canonical cache key and term set of a query line
///
/// Returns `None` when the line has no stems.
pub fn canonical_query(analyzer: &TextAnalyzer, line: &str) -> Option<(String, BTreeSet<String>)> {
    let terms = analyzer.unique_stems(line);
    if terms.is_empty() {
        return None;
    }
    let key = terms.iter().map(String::as_str).collect::<Vec<_>>().join(" ");
    Some((key, terms))
}

/// Common interface of the plain and threaded query engines
pub trait QueryHandler {
    /// Run (or schedule) one query line
    ///
    /// A line whose canonical query was already handled is a no-op.
    fn handle_query(&mut self, line: &str, partial: bool);

    /// Wait until every handled query has its results cached
    fn finish(&mut self) -> Result<()>;

    /// Snapshot of the cached results, keyed by canonical query
    fn results(&self) -> BTreeMap<String, Vec<SearchResult>>;

    /// Number of distinct canonical queries cached
    fn num_queries(&self) -> usize;

    /// Number of searches actually run against the index
    fn searches_run(&self) -> usize;

    /// Write the cached results as pretty JSON
    fn write_results_json(&self, writer: &mut dyn Write) -> Result<()>;

    /// Handle every non-blank line of a query file, then `finish`
    ///
    /// # Errors
    ///
    /// I/O errors opening or reading the file. Queries handled before the
    /// error keep their results.
    fn process_file(&mut self, path: &Path, partial: bool) -> Result<()> {
        let reader = BufReader::new(File::open(path)?);
        let mut outcome = Ok(());

        for line in reader.lines() {
            match line {
                Ok(line) if line.trim().is_empty() => {}
                Ok(line) => self.handle_query(&line, partial),
                Err(e) => {
                    outcome = Err(e.into());
                    break;
                }
            }
        }

        self.finish()?;
        outcome
    }

    /// Write the cached results as pretty JSON to a file
    fn write_results(&self, path: &Path) -> Result<()> {
        json::write_to_path(path, |writer| self.write_results_json(writer))
    }
}
