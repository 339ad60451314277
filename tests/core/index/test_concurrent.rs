// Concurrent guard tests

use crate::common::terms;
use std::sync::{Arc, Barrier};
use std::thread;
use stemdex::core::index::{ConcurrentIndex, IndexReader, InvertedIndex};

#[test]
fn test_readers_do_not_block_each_other() {
    let index = Arc::new(ConcurrentIndex::new());
    index.add("cat", "A", 1);

    // Every reader holds the read lock until all readers hold it
    let readers = 8;
    let barrier = Arc::new(Barrier::new(readers));
    let handles: Vec<_> = (0..readers)
        .map(|_| {
            let index = Arc::clone(&index);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                index.with_read(|inner| {
                    barrier.wait();
                    inner.exact_search(&terms(&["cat"])).len()
                })
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 1);
    }
}

#[test]
fn test_searches_during_merges_see_whole_documents() {
    let index = Arc::new(ConcurrentIndex::new());

    let writer = {
        let index = Arc::clone(&index);
        thread::spawn(move || {
            for doc in 0..200 {
                let mut local = InvertedIndex::new();
                local.add_words(["alpha", "beta", "gamma", "delta"], &format!("doc{doc}"), 1);
                index.add_all(local);
            }
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let index = Arc::clone(&index);
            thread::spawn(move || {
                for _ in 0..200 {
                    // A merged document always brings all four words and its count
                    for result in index.exact_search(&terms(&["delta"])) {
                        assert_eq!(result.token_count, 4);
                        assert!(index.contains("alpha", &result.document, 1));
                    }
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }

    assert_eq!(index.num_counted_documents(), 200);
    assert_eq!(index.num_documents("gamma"), 200);
}

#[test]
fn test_merge_order_does_not_matter() {
    let partials: Vec<InvertedIndex> = (0..20)
        .map(|i| {
            let own = format!("own{i}");
            let mut local = InvertedIndex::new();
            local.add_words(["shared", own.as_str(), "shared"], &format!("file{i}"), 1);
            local
        })
        .collect();

    let forward = ConcurrentIndex::new();
    for partial in partials.iter().cloned() {
        forward.add_all(partial);
    }

    let backward = ConcurrentIndex::new();
    for partial in partials.iter().rev().cloned() {
        backward.add_all(partial);
    }

    let mut sequential = InvertedIndex::new();
    for i in 0..20 {
        let own = format!("own{i}");
        sequential.add_words(["shared", own.as_str(), "shared"], &format!("file{i}"), 1);
    }

    assert_eq!(forward.into_inner(), sequential);
    assert_eq!(backward.into_inner(), sequential);
}
