// Work queue completion barrier

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use stemdex::core::error::StemdexError;
use stemdex::core::queue::WorkQueue;

#[test]
fn test_hundred_tasks_four_workers() {
    let queue = WorkQueue::new(4).unwrap();
    let runs: Arc<Vec<AtomicUsize>> = Arc::new((0..100).map(|_| AtomicUsize::new(0)).collect());

    for i in 0..100 {
        let runs = Arc::clone(&runs);
        queue.submit(move || {
            runs[i].fetch_add(1, Ordering::SeqCst);
        });
    }
    queue.wait_idle().unwrap();

    assert_eq!(queue.pending(), 0);
    assert!(runs.iter().all(|r| r.load(Ordering::SeqCst) == 1));
}

#[test]
fn test_wait_idle_covers_tasks_spawned_by_tasks() {
    let queue = WorkQueue::new(3).unwrap();
    let handle = queue.handle();
    let finished = Arc::new(AtomicUsize::new(0));

    // A binary tree of tasks, 2^7 - 1 in total
    fn spawn(handle: stemdex::core::queue::QueueHandle, depth: usize, finished: Arc<AtomicUsize>) {
        let next = handle.clone();
        handle.submit(move || {
            std::thread::sleep(Duration::from_millis(1));
            if depth > 1 {
                spawn(next.clone(), depth - 1, Arc::clone(&finished));
                spawn(next, depth - 1, Arc::clone(&finished));
            }
            finished.fetch_add(1, Ordering::SeqCst);
        });
    }
    spawn(handle, 7, Arc::clone(&finished));

    queue.wait_idle().unwrap();
    assert_eq!(finished.load(Ordering::SeqCst), 127);
}

#[test]
fn test_queue_reusable_after_idle() {
    let queue = WorkQueue::new(2).unwrap();
    let seen = Arc::new(Mutex::new(Vec::new()));

    for round in 0..3 {
        for _ in 0..10 {
            let seen = Arc::clone(&seen);
            queue.submit(move || seen.lock().unwrap().push(round));
        }
        queue.wait_idle().unwrap();
        assert_eq!(seen.lock().unwrap().len(), (round + 1) * 10);
    }
}

#[test]
fn test_shutdown_with_queued_work_interrupts_waiters() {
    let queue = WorkQueue::new(1).unwrap();
    let (started_tx, started_rx) = std::sync::mpsc::channel();
    let (release_tx, release_rx) = std::sync::mpsc::channel::<()>();

    queue.submit(move || {
        started_tx.send(()).unwrap();
        release_rx.recv().unwrap();
    });
    for _ in 0..5 {
        queue.submit(|| {});
    }
    started_rx.recv().unwrap();

    queue.shutdown();
    release_tx.send(()).unwrap();

    assert!(matches!(queue.wait_idle(), Err(StemdexError::Interrupted(_))));
    assert_eq!(queue.pending(), 0);
}

#[test]
fn test_zero_workers_uses_default() {
    let queue = WorkQueue::new(0).unwrap();

    assert_eq!(queue.size(), WorkQueue::DEFAULT_WORKERS);
}
