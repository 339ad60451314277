//! Document indexing module.
//!
//! Turns local text files into inverted index entries:
//!
//! - File system walking with case-insensitive pattern matching
//! - Line-by-line parsing with positions that continue across lines
//! - A plain builder that fills an index on the calling thread
//! - A threaded builder that parses one file per task and merges
//!   private per-file indexes into a shared one

pub mod builder;
pub mod threaded;
pub mod walker;

pub use builder::{parse_file, IndexBuilder, IndexStats};
pub use threaded::ThreadedIndexBuilder;
pub use walker::FileWalker;
