// Export format tests
//
// The JSON layout is consumed by other tools, so these compare whole
// documents rather than parsing them back.

use crate::common::{render_counts, render_index, TestRepo};
use stemdex::core::error::StemdexError;
use stemdex::core::index::{IndexReader, InvertedIndex};

fn cat_dog() -> InvertedIndex {
    let mut index = InvertedIndex::new();
    index.add_words(["the", "cat", "sat"], "A", 1);
    index.add_words(["the", "dog", "sat"], "B", 1);
    index
}

#[test]
fn test_index_export_layout() {
    let expected = r#"{
  "cat": {
    "A": [
      2
    ]
  },
  "dog": {
    "B": [
      2
    ]
  },
  "sat": {
    "A": [
      3
    ],
    "B": [
      3
    ]
  },
  "the": {
    "A": [
      1
    ],
    "B": [
      1
    ]
  }
}"#;

    assert_eq!(render_index(&cat_dog()), expected);
}

#[test]
fn test_counts_export_layout() {
    let expected = "{\n  \"A\": 3,\n  \"B\": 3\n}";

    assert_eq!(render_counts(&cat_dog()), expected);
}

#[test]
fn test_empty_exports() {
    let index = InvertedIndex::new();

    assert_eq!(render_index(&index), "{}");
    assert_eq!(render_counts(&index), "{}");
}

#[test]
fn test_write_to_file() {
    let repo = TestRepo::with_files(&[]);
    let path = repo.path().join("index.json");

    cat_dog().write_index(&path).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, render_index(&cat_dog()));
}

#[test]
fn test_unwritable_path_is_export_error() {
    let repo = TestRepo::with_files(&[]);
    let path = repo.path().join("missing-dir").join("counts.json");

    let err = cat_dog().write_counts(&path).unwrap_err();

    match err {
        StemdexError::Export { path: failed, .. } => assert_eq!(failed, path),
        other => panic!("expected export error, got {other:?}"),
    }
}
