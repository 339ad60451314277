//! Line tokenizer.
//!
//! Cleans a line of text into lowercase words: the text is decomposed
//! (NFD) so accents split off their base letter, every character that is
//! neither alphabetic nor whitespace is dropped, and the remainder is split
//! on whitespace.

use unicode_normalization::UnicodeNormalization;

/// Clean a line into lowercase alphabetic text
pub fn clean(line: &str) -> String {
    line.nfd()
        .filter(|c| c.is_alphabetic() || c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Parse a line into cleaned, lowercased word tokens
pub fn parse(line: &str) -> Vec<String> {
    clean(line)
        .split_whitespace()
        .map(str::to_string)
        .collect()
}
