//! Core domain logic
//!
//! Everything except the command-line surface lives here.
//!
//! # Architecture
//!
//! - **config**: Configuration loading (TOML + environment)
//! - **error**: Error types and Result alias
//! - **xdg**: XDG directory handling
//! - **queue**: Worker pool with a completion barrier
//! - **index**: Inverted index, its lock guard, ranking and exports
//! - **indexer**: File walking and plain/threaded index building
//! - **crawler**: Bounded, deduplicated web crawler
//! - **query**: Plain and threaded query engines with result caching
//! - **text**: Tokenizing, stemming, HTML cleaning and fetching
//! - **services**: Unified service container

pub mod config;
pub mod crawler;
pub mod error;
pub mod index;
pub mod indexer;
pub mod query;
pub mod queue;
pub mod services;
pub mod text;
pub mod xdg;

// Re-export key types for convenience
pub use config::Config;
pub use error::{Result, StemdexError};
pub use services::Services;
