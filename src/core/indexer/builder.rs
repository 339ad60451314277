//! Plain index builder.
//!
//! Walks a file tree and parses every text file into an inverted index,
//! one file after another on the calling thread.

use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;
use std::time::Instant;

use crate::core::error::{Result, StemdexError};
use crate::core::index::InvertedIndex;
use crate::core::indexer::FileWalker;
use crate::core::text::TextAnalyzer;

/// Statistics about one indexing run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    /// Files parsed into the index
    pub files_indexed: usize,
    /// Files that could not be read or decoded
    pub files_skipped: usize,
    /// Stemmed tokens added across all files
    pub tokens_indexed: usize,
    /// Wall-clock duration in milliseconds
    pub duration_ms: u64,
}

/// Parse one file into `index`
///
/// Reads line by line. Positions start at 1, continue across lines and
/// count stemmed tokens. The document identifier is the path as given.
/// The file is parsed into a private index first, so a file that fails
/// partway adds nothing to `index`.
///
/// # Returns
///
/// The number of tokens added
///
/// # Errors
///
/// `IndexingFailed` if the file cannot be opened or is not valid UTF-8.
pub fn parse_file(path: &Path, analyzer: &TextAnalyzer, index: &mut InvertedIndex) -> Result<usize> {
    let file = File::open(path)
        .map_err(|e| StemdexError::IndexingFailed(format!("Failed to read {path:?}: {e}")))?;
    let reader = BufReader::new(file);
    let document = path.display().to_string();

    let mut local = InvertedIndex::new();
    let mut position = 1;
    for line in reader.lines() {
        let line = line.map_err(|e| {
            if e.kind() == ErrorKind::InvalidData {
                StemdexError::IndexingFailed(format!("Skipping non-UTF-8 file: {path:?}"))
            } else {
                StemdexError::IndexingFailed(format!("Failed to read {path:?}: {e}"))
            }
        })?;
        position = local.add_words(analyzer.stems(&line), &document, position);
    }

    index.add_all(local);
    Ok(position - 1)
}

/// Builds an inverted index from files, one at a time
pub struct IndexBuilder {
    walker: FileWalker,
    analyzer: TextAnalyzer,
}

impl IndexBuilder {
    /// Create a new builder
    pub fn new(walker: FileWalker, analyzer: TextAnalyzer) -> Self {
        Self { walker, analyzer }
    }

    /// Index every text file below `root` into `index`
    ///
    /// Files that fail to parse are logged, counted as skipped and leave
    /// no trace in `index`.
    ///
    /// # Errors
    ///
    /// `InvalidPath` if `root` does not exist.
    pub fn index_directory(&self, root: &Path, index: &mut InvertedIndex) -> Result<IndexStats> {
        let start = Instant::now();

        tracing::info!("Starting file collection from {:?}", root);
        let files = self.walker.collect_files(root)?;
        tracing::info!("Found {} files to index", files.len());

        let mut stats = IndexStats::default();

        for (idx, file_path) in files.iter().enumerate() {
            if idx % 100 == 0 && idx > 0 {
                tracing::info!("Progress: {}/{} files processed", idx, files.len());
            }

            match parse_file(file_path, &self.analyzer, index) {
                Ok(tokens) => {
                    stats.files_indexed += 1;
                    stats.tokens_indexed += tokens;
                    tracing::debug!("Indexed {:?} ({} tokens)", file_path, tokens);
                }
                Err(e) => {
                    tracing::warn!("Failed to process {:?}: {}", file_path, e);
                    stats.files_skipped += 1;
                }
            }
        }

        stats.duration_ms = start.elapsed().as_millis() as u64;

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
