//! Threaded index builder.
//!
//! Submits one work queue task per file. Each task parses its file into
//! a private index and merges it into the shared index with a single
//! `add_all`, so the write lock is taken once per file instead of once
//! per token.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use crate::core::error::Result;
use crate::core::index::{ConcurrentIndex, InvertedIndex};
use crate::core::indexer::builder::{parse_file, IndexStats};
use crate::core::indexer::FileWalker;
use crate::core::queue::WorkQueue;
use crate::core::text::TextAnalyzer;

#[derive(Default)]
struct Counters {
    indexed: AtomicUsize,
    skipped: AtomicUsize,
    tokens: AtomicUsize,
}

/// Builds a shared index from files in parallel
pub struct ThreadedIndexBuilder<'q> {
    walker: FileWalker,
    analyzer: TextAnalyzer,
    index: Arc<ConcurrentIndex>,
    queue: &'q WorkQueue,
}

impl<'q> ThreadedIndexBuilder<'q> {
    /// Create a new builder writing into `index` through `queue`
    pub fn new(
        walker: FileWalker,
        analyzer: TextAnalyzer,
        index: Arc<ConcurrentIndex>,
        queue: &'q WorkQueue,
    ) -> Self {
        Self {
            walker,
            analyzer,
            index,
            queue,
        }
    }

    /// Index every text file below `root`
    ///
    /// Returns once every file task has finished, so the caller observes
    /// a complete index.
    ///
    /// # Errors
    ///
    /// `InvalidPath` if `root` does not exist, `Interrupted` if the queue
    /// was shut down before all files were parsed.
    pub fn index_directory(&self, root: &Path) -> Result<IndexStats> {
        let start = Instant::now();

        tracing::info!("Starting file collection from {:?}", root);
        let files = self.walker.collect_files(root)?;
        tracing::info!(
            "Found {} files to index on {} workers",
            files.len(),
            self.queue.size()
        );

        let counters = Arc::new(Counters::default());

        for file_path in files {
            let analyzer = self.analyzer.clone();
            let index = Arc::clone(&self.index);
            let counters = Arc::clone(&counters);

            self.queue.submit(move || {
                let mut local = InvertedIndex::new();
                match parse_file(&file_path, &analyzer, &mut local) {
                    Ok(tokens) => {
                        index.add_all(local);
                        counters.indexed.fetch_add(1, Ordering::Relaxed);
                        counters.tokens.fetch_add(tokens, Ordering::Relaxed);
                        tracing::debug!("Indexed {:?} ({} tokens)", file_path, tokens);
                    }
                    Err(e) => {
                        tracing::warn!("Failed to process {:?}: {}", file_path, e);
                        counters.skipped.fetch_add(1, Ordering::Relaxed);
                    }
                }
            });
        }

        self.queue.wait_idle()?;

        let stats = IndexStats {
            files_indexed: counters.indexed.load(Ordering::Relaxed),
            files_skipped: counters.skipped.load(Ordering::Relaxed),
            tokens_indexed: counters.tokens.load(Ordering::Relaxed),
            duration_ms: start.elapsed().as_millis() as u64,
        };

        tracing::info!(
            "Indexing complete: {} files indexed, {} skipped, \
             {} tokens in {}ms",
            stats.files_indexed,
            stats.files_skipped,
            stats.tokens_indexed,
            stats.duration_ms
        );

        Ok(stats)
    }
}
