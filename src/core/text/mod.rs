//! Text processing collaborators.
//!
//! Everything that turns raw input into normalized words lives here:
//! tokenizing lines, stemming tokens, cleaning HTML, extracting links and
//! fetching pages. The index, builders, crawler and query engines only
//! see the `TextAnalyzer` and `Fetcher` seams.

pub mod analyzer;
pub mod fetcher;
pub mod html;
pub mod stemmer;
pub mod tokenizer;

pub use analyzer::TextAnalyzer;
pub use fetcher::{Fetcher, HttpFetcher};
pub use stemmer::{IdentityStemmer, SnowballStemmer, Stemmer};
