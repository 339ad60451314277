//! Word stemmers.
//!
//! `Stemmer` is the seam the rest of the crate depends on. The default
//! implementation wraps the Snowball stemmers from `rust-stemmers`; the
//! identity stemmer indexes words exactly as the tokenizer produced them.

use crate::core::error::{Result, StemdexError};
use rust_stemmers::Algorithm;

/// Reduces a token to its normalized root form
pub trait Stemmer: Send + Sync {
    /// Stem a single cleaned, lowercased token
    fn stem(&self, token: &str) -> String;
}

/// Snowball stemmer for a single language
pub struct SnowballStemmer {
    inner: rust_stemmers::Stemmer,
    language: String,
}

impl SnowballStemmer {
    /// Create a Snowball stemmer for the named language
    ///
    /// # Arguments
    ///
    /// * `language` - Lowercase language name, e.g. "english"
    pub fn new(language: &str) -> Result<Self> {
        let algorithm = match language {
            "arabic" => Algorithm::Arabic,
            "danish" => Algorithm::Danish,
            "dutch" => Algorithm::Dutch,
            "english" => Algorithm::English,
            "finnish" => Algorithm::Finnish,
            "french" => Algorithm::French,
            "german" => Algorithm::German,
            "greek" => Algorithm::Greek,
            "hungarian" => Algorithm::Hungarian,
            "italian" => Algorithm::Italian,
            "norwegian" => Algorithm::Norwegian,
            "portuguese" => Algorithm::Portuguese,
            "romanian" => Algorithm::Romanian,
            "russian" => Algorithm::Russian,
            "spanish" => Algorithm::Spanish,
            "swedish" => Algorithm::Swedish,
            "tamil" => Algorithm::Tamil,
            "turkish" => Algorithm::Turkish,
            other => {
                return Err(StemdexError::ConfigError(format!(
                    "Unsupported stemmer language '{other}'"
                )))
            }
        };

        Ok(Self {
            inner: rust_stemmers::Stemmer::create(algorithm),
            language: language.to_string(),
        })
    }

    /// English Snowball stemmer
    pub fn english() -> Self {
        Self {
            inner: rust_stemmers::Stemmer::create(Algorithm::English),
            language: "english".to_string(),
        }
    }

    /// Language this stemmer was created for
    pub fn language(&self) -> &str {
        &self.language
    }
}

impl Stemmer for SnowballStemmer {
    fn stem(&self, token: &str) -> String {
        self.inner.stem(token).into_owned()
    }
}

/// Stemmer that leaves tokens untouched
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityStemmer;

impl Stemmer for IdentityStemmer {
    fn stem(&self, token: &str) -> String {
        token.to_string()
    }
}
