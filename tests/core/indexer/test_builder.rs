// Plain and threaded directory builds

use crate::common::{
    build_plain_index, build_threaded_index, create_test_services, render_counts, render_index,
    TestRepo,
};
use std::sync::Arc;
use stemdex::core::error::StemdexError;
use stemdex::core::index::{ConcurrentIndex, IndexReader};
use stemdex::core::indexer::{IndexBuilder, ThreadedIndexBuilder};
use stemdex::core::queue::WorkQueue;

fn doc(repo: &TestRepo, relative: &str) -> String {
    repo.path().join(relative).display().to_string()
}

#[test]
fn test_plain_build_positions_continue_across_lines() {
    let repo = TestRepo::animals();
    let services = create_test_services();
    let index = build_plain_index(&services, repo.path());

    let b = doc(&repo, "b.txt");
    // "The dog chased the cat." then "The cat ran away."
    assert!(index.contains("cat", &b, 5));
    assert!(index.contains("cat", &b, 7));
    assert_eq!(index.token_count(&b), Some(9));
}

#[test]
fn test_include_patterns_select_files() {
    let repo = TestRepo::animals();
    let services = create_test_services();
    let index = build_plain_index(&services, repo.path());

    assert_eq!(index.num_counted_documents(), 4);
    assert!(index.token_count(&doc(&repo, "nested/deeper/d.text")).is_some());
    assert!(index.token_count(&doc(&repo, "notes.md")).is_none());
}

#[test]
fn test_stems_are_indexed() {
    let repo = TestRepo::animals();
    let services = create_test_services();
    let index = build_plain_index(&services, repo.path());

    let c = doc(&repo, "nested/c.txt");
    // "cats" and "cat" share a stem
    assert!(index.contains("cat", &c, 3));
    assert!(index.contains("dog", &c, 1));
    assert_eq!(index.num_documents("run"), 1);
}

#[test]
fn test_threaded_build_matches_plain() {
    let repo = TestRepo::generated(60);
    let services = create_test_services();

    let plain = build_plain_index(&services, repo.path());
    for workers in [1, 3, 8] {
        let threaded = build_threaded_index(&services, repo.path(), workers);

        assert_eq!(render_index(&*threaded), render_index(&plain));
        assert_eq!(render_counts(&*threaded), render_counts(&plain));
    }
}

#[test]
fn test_single_file_root() {
    let repo = TestRepo::animals();
    let services = create_test_services();
    let file = repo.path().join("a.txt");

    let index = build_plain_index(&services, &file);

    assert_eq!(index.num_counted_documents(), 1);
    assert_eq!(index.token_count(&doc(&repo, "a.txt")), Some(6));
}

#[test]
fn test_unreadable_file_skipped_in_both_builders() {
    let repo = TestRepo::with_files(&[("good.txt", "apple banana")]);
    std::fs::write(repo.path().join("bad.txt"), [0xffu8, 0xfe, 0x00, 0xc3]).unwrap();
    let services = create_test_services();

    let plain = IndexBuilder::new(services.create_walker().unwrap(), services.analyzer.clone());
    let mut index = stemdex::core::index::InvertedIndex::new();
    let stats = plain.index_directory(repo.path(), &mut index).unwrap();
    assert_eq!(stats.files_indexed, 1);
    assert_eq!(stats.files_skipped, 1);

    let queue = WorkQueue::new(2).unwrap();
    let shared = Arc::new(ConcurrentIndex::new());
    let threaded = ThreadedIndexBuilder::new(
        services.create_walker().unwrap(),
        services.analyzer.clone(),
        Arc::clone(&shared),
        &queue,
    );
    let stats = threaded.index_directory(repo.path()).unwrap();
    assert_eq!(stats.files_indexed, 1);
    assert_eq!(stats.files_skipped, 1);
    assert_eq!(render_index(&*shared), render_index(&index));
}

#[test]
fn test_file_failing_midway_leaves_no_trace() {
    let repo = TestRepo::with_files(&[("good.txt", "apple")]);
    std::fs::write(repo.path().join("mixed.txt"), b"hello world\n\xff\xfe\n").unwrap();
    let services = create_test_services();

    let plain = IndexBuilder::new(services.create_walker().unwrap(), services.analyzer.clone());
    let mut index = stemdex::core::index::InvertedIndex::new();
    let stats = plain.index_directory(repo.path(), &mut index).unwrap();
    assert_eq!(stats.files_skipped, 1);
    assert_eq!(stats.tokens_indexed, 1);
    assert_eq!(index.num_words(), 1);
    assert_eq!(index.num_counted_documents(), 1);
    assert!(index.token_count(&doc(&repo, "mixed.txt")).is_none());

    let threaded = build_threaded_index(&services, repo.path(), 2);
    assert_eq!(render_index(&*threaded), render_index(&index));
    assert_eq!(render_counts(&*threaded), render_counts(&index));
}

#[test]
fn test_missing_root_is_invalid_path() {
    let repo = TestRepo::with_files(&[]);
    let services = create_test_services();
    let queue = WorkQueue::new(2).unwrap();
    let builder = ThreadedIndexBuilder::new(
        services.create_walker().unwrap(),
        services.analyzer.clone(),
        Arc::new(ConcurrentIndex::new()),
        &queue,
    );

    let result = builder.index_directory(&repo.path().join("nope"));

    assert!(matches!(result, Err(StemdexError::InvalidPath(_))));
}
