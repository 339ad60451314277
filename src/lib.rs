//! stemdex - concurrent inverted-index search engine
//!
//! Builds a word-position index from local text files and crawled web
//! pages, and answers ranked multi-word queries against it.
//!
//! # Architecture
//!
//! - **core**: Domain logic
//!   - config, error, xdg
//!   - queue (fixed worker pool with a completion barrier)
//!   - index (inverted index, read/write guard, JSON exports)
//!   - indexer (file walking, plain and threaded builders)
//!   - crawler (frontier-bounded web crawl)
//!   - query (cached query engines)
//!   - text (tokenizer, stemmer, HTML cleaning, fetching)
//!
//! - **cli**: Command-line adapter (depends on core)
//!
//! # Key Features
//!
//! - Exact and prefix search ranked by match density
//! - Parallel ingestion that merges per-file private indexes
//! - Crawls that stop at a fixed page budget, each URL fetched once
//! - Duplicate queries computed exactly once, even in parallel

pub mod cli;
pub mod core;

pub use core::config::Config;
pub use core::error::{Result, StemdexError};
pub use core::index::{ConcurrentIndex, IndexReader, InvertedIndex, SearchResult};
pub use core::queue::WorkQueue;
pub use core::services::Services;
