//! Unified service container for stemdex
//!
//! Builds the configured collaborators every command needs.

use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::indexer::FileWalker;
use crate::core::queue::WorkQueue;
use crate::core::text::{HttpFetcher, TextAnalyzer};
use std::sync::Arc;

/// Unified services container
#[derive(Clone)]
pub struct Services {
    /// Application configuration
    pub config: Arc<Config>,

    /// Analyzer for the configured language
    pub analyzer: TextAnalyzer,
}

impl Services {
    /// Create services from configuration
    ///
    /// # Errors
    ///
    /// `ConfigError` if the configured language has no stemmer.
    pub fn new(config: Config) -> Result<Self> {
        let analyzer = TextAnalyzer::for_language(&config.text.language)?;

        Ok(Self {
            config: Arc::new(config),
            analyzer,
        })
    }

    /// Create a FileWalker from the indexing configuration
    pub fn create_walker(&self) -> Result<FileWalker> {
        let indexing = &self.config.indexing;
        FileWalker::new(
            indexing.include_patterns.clone(),
            indexing.exclude_patterns.clone(),
            indexing.max_file_size_mb,
            indexing.follow_links,
        )
    }

    /// Start a work queue with `workers` threads
    pub fn create_queue(&self, workers: usize) -> Result<WorkQueue> {
        WorkQueue::new(workers)
    }

    /// Create an HTTP fetcher from the crawl configuration
    pub fn create_fetcher(&self) -> Result<HttpFetcher> {
        let crawl = &self.config.crawl;
        HttpFetcher::new(crawl.max_attempts, crawl.timeout(), &crawl.user_agent)
    }
}
