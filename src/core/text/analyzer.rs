//! Tokenize-then-stem pipeline shared by every component.

use crate::core::error::Result;
use crate::core::text::stemmer::{IdentityStemmer, SnowballStemmer, Stemmer};
use crate::core::text::tokenizer;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

/// Turns raw text into stemmed words
///
/// Cheap to clone: the stemmer is shared behind an `Arc`, so every worker
/// task can carry its own handle.
#[derive(Clone)]
pub struct TextAnalyzer {
    stemmer: Arc<dyn Stemmer>,
}

impl TextAnalyzer {
    /// Create an analyzer around an explicit stemmer
    pub fn new(stemmer: Arc<dyn Stemmer>) -> Self {
        Self { stemmer }
    }

    /// Create an analyzer for a configured language
    ///
    /// `"none"` disables stemming.
    pub fn for_language(language: &str) -> Result<Self> {
        let stemmer: Arc<dyn Stemmer> = match language {
            "none" => Arc::new(IdentityStemmer),
            other => Arc::new(SnowballStemmer::new(other)?),
        };
        Ok(Self::new(stemmer))
    }

    /// English Snowball analyzer
    pub fn english() -> Self {
        Self::new(Arc::new(SnowballStemmer::english()))
    }

    /// Stemmed words of a line, in order, duplicates kept
    pub fn stems(&self, line: &str) -> Vec<String> {
        tokenizer::parse(line)
            .iter()
            .map(|token| self.stemmer.stem(token))
            .collect()
    }

    /// Sorted, deduplicated stemmed words of a line
    pub fn unique_stems(&self, line: &str) -> BTreeSet<String> {
        tokenizer::parse(line)
            .iter()
            .map(|token| self.stemmer.stem(token))
            .collect()
    }

    /// Stem a single already-cleaned token
    pub fn stem(&self, token: &str) -> String {
        self.stemmer.stem(token)
    }
}

impl Default for TextAnalyzer {
    fn default() -> Self {
        Self::english()
    }
}

impl fmt::Debug for TextAnalyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextAnalyzer").finish_non_exhaustive()
    }
}
