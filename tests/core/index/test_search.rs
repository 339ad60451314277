// Ranking tests over small hand-built indexes

use crate::common::terms;
use stemdex::core::index::{IndexReader, InvertedIndex};

fn cat_dog() -> InvertedIndex {
    let mut index = InvertedIndex::new();
    index.add_words(["the", "cat", "sat"], "A", 1);
    index.add_words(["the", "dog", "sat"], "B", 1);
    index
}

#[test]
fn test_exact_single_document() {
    let results = cat_dog().exact_search(&terms(&["cat"]));

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].document, "A");
    assert_eq!(results[0].count, 1);
    assert_eq!(format!("{:.8}", results[0].score()), "0.33333333");
}

#[test]
fn test_partial_prefix_matches_same_document() {
    let index = cat_dog();

    assert_eq!(
        index.partial_search(&terms(&["ca"])),
        index.exact_search(&terms(&["cat"]))
    );
}

#[test]
fn test_tie_broken_by_document_ascending() {
    let results = cat_dog().exact_search(&terms(&["the"]));
    let documents: Vec<&str> = results.iter().map(|r| r.document.as_str()).collect();

    assert_eq!(documents, vec!["A", "B"]);
    assert_eq!(results[0].score(), results[1].score());
}

#[test]
fn test_tie_break_ignores_case() {
    let mut index = InvertedIndex::new();
    index.add("word", "b", 1);
    index.add("word", "A", 1);
    index.add("word", "C", 1);

    let results = index.exact_search(&terms(&["word"]));
    let documents: Vec<&str> = results.iter().map(|r| r.document.as_str()).collect();

    assert_eq!(documents, vec!["A", "b", "C"]);
}

#[test]
fn test_score_before_count() {
    let mut index = InvertedIndex::new();
    // long: 2 matches out of 10 tokens, short: 1 match out of 2 tokens
    index.add("x", "long", 1);
    index.add("x", "long", 2);
    index.add("filler", "long", 10);
    index.add("x", "short", 1);
    index.add("filler", "short", 2);

    let results = index.exact_search(&terms(&["x"]));

    assert_eq!(results[0].document, "short");
    assert_eq!(results[1].document, "long");
    assert_eq!(results[1].count, 2);
}

#[test]
fn test_partial_stops_at_prefix_boundary() {
    let mut index = InvertedIndex::new();
    index.add_words(["car", "card", "care", "cart", "cat", "dog"], "doc", 1);

    let results = index.partial_search(&terms(&["car"]));

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].count, 4);
}

#[test]
fn test_search_dispatches_on_flag() {
    let index = cat_dog();
    let prefix = terms(&["sa"]);

    assert!(index.search(&prefix, false).is_empty());
    assert_eq!(index.search(&prefix, true).len(), 2);
}

#[test]
fn test_no_match_is_empty() {
    let index = cat_dog();

    assert!(index.exact_search(&terms(&["zebra"])).is_empty());
    assert!(index.partial_search(&terms(&["zz"])).is_empty());
    assert!(InvertedIndex::new().partial_search(&terms(&["a"])).is_empty());
}

#[test]
fn test_contains_survives_unrelated_adds() {
    let mut index = cat_dog();
    for i in 1..=50 {
        index.add("other", "C", i);
    }

    assert!(index.contains("cat", "A", 2));
    assert!(index.contains("dog", "B", 2));
    assert_eq!(index.token_count("A"), Some(3));
    assert_eq!(index.token_count("C"), Some(50));
}
