//! File system walker with pattern-based filtering.
//!
//! Traverses directory trees and decides which files are text files
//! worth indexing. Include patterns match case-insensitively, so the
//! default `*.txt` also accepts `NOTES.TXT`. Walk errors (permission
//! denied, broken links) are logged and skipped.

use glob::{MatchOptions, Pattern};
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::core::error::{Result, StemdexError};

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: false,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

/// File system walker with pattern-based filtering
pub struct FileWalker {
    /// Patterns to include (e.g., "*.txt", "*.text")
    include_patterns: Vec<Pattern>,

    /// Patterns to exclude (e.g., "**/drafts/**")
    exclude_patterns: Vec<Pattern>,

    /// Maximum file size in bytes (skip larger files)
    max_file_size_bytes: u64,

    /// Follow symbolic links while walking
    follow_links: bool,
}

impl FileWalker {
    /// Create a new file walker
    ///
    /// # Arguments
    ///
    /// * `include_patterns` - Glob patterns for files to include
    /// * `exclude_patterns` - Glob patterns for files to exclude
    /// * `max_file_size_mb` - Maximum file size in megabytes
    /// * `follow_links` - Whether to follow symbolic links
    ///
    /// # Returns
    ///
    /// A new `FileWalker` instance or an error if patterns are
    /// invalid
    pub fn new(
        include_patterns: Vec<String>,
        exclude_patterns: Vec<String>,
        max_file_size_mb: usize,
        follow_links: bool,
    ) -> Result<Self> {
        Ok(Self {
            include_patterns: Self::compile("include", include_patterns)?,
            exclude_patterns: Self::compile("exclude", exclude_patterns)?,
            max_file_size_bytes: (max_file_size_mb as u64) * 1024 * 1024,
            follow_links,
        })
    }

    fn compile(kind: &str, patterns: Vec<String>) -> Result<Vec<Pattern>> {
        patterns
            .into_iter()
            .map(|p| {
                Pattern::new(&p).map_err(|e| {
                    StemdexError::ConfigError(format!("Invalid {kind} pattern '{p}': {e}"))
                })
            })
            .collect()
    }

    /// Collect all matching files below `root`
    ///
    /// If `root` is itself a file it is returned as-is, without checking
    /// patterns or size. Files are returned in walk order.
    ///
    /// # Errors
    ///
    /// `InvalidPath` if `root` does not exist.
    pub fn collect_files(&self, root: &Path) -> Result<Vec<PathBuf>> {
        if !root.exists() {
            return Err(StemdexError::InvalidPath(format!(
                "Path does not exist: {}",
                root.display()
            )));
        }

        if root.is_file() {
            return Ok(vec![root.to_path_buf()]);
        }

        let mut files = Vec::new();

        for entry in WalkDir::new(root)
            .follow_links(self.follow_links)
            .into_iter()
            .filter_entry(|e| self.should_process_entry(e, root))
        {
            match entry {
                Ok(entry) => {
                    if !entry.file_type().is_file() {
                        continue;
                    }

                    let path = entry.path();

                    if let Ok(metadata) = entry.metadata() {
                        if metadata.len() > self.max_file_size_bytes {
                            tracing::debug!(
                                "Skipping large file: {:?} \
                                 ({} bytes)",
                                path,
                                metadata.len()
                            );
                            continue;
                        }
                    }

                    if self.is_text_file(path) {
                        files.push(path.to_path_buf());
                    }
                }
                Err(e) => {
                    tracing::warn!("Walk error: {}", e);
                }
            }
        }

        Ok(files)
    }

    /// Determine if a directory entry should be descended into
    ///
    /// Prunes excluded directory trees early. Never filters the root
    /// directory itself.
    fn should_process_entry(&self, entry: &DirEntry, root: &Path) -> bool {
        let path = entry.path();

        if path == root || !entry.file_type().is_dir() {
            return true;
        }

        for pattern in &self.exclude_patterns {
            if pattern.matches_path_with(path, MATCH_OPTIONS) {
                tracing::debug!("Skipping excluded directory: {:?}", path);
                return false;
            }
        }

        true
    }

    /// Check if a file path is accepted by the include/exclude patterns
    pub fn is_text_file(&self, path: &Path) -> bool {
        let path_str = match path.to_str() {
            Some(s) => s,
            None => return false,
        };
        let file_name = path.file_name().and_then(|f| f.to_str());

        // No include patterns means include everything
        let matches_include = self.include_patterns.is_empty()
            || self.include_patterns.iter().any(|p| {
                p.matches_with(path_str, MATCH_OPTIONS)
                    || file_name
                        .map(|f| p.matches_with(f, MATCH_OPTIONS))
                        .unwrap_or(false)
            });

        if !matches_include {
            return false;
        }

        !self
            .exclude_patterns
            .iter()
            .any(|p| p.matches_with(path_str, MATCH_OPTIONS))
    }
}
