//! Fixed-size worker pool draining a shared FIFO task queue.
//!
//! Used by the threaded index builder, the crawler and the threaded
//! query engine. Besides running tasks, the queue tracks how many
//! submitted tasks have not finished yet. `wait_idle` blocks until that
//! count reaches zero, which includes tasks submitted by other tasks, so
//! self-expanding work such as crawling terminates at the natural fixed
//! point where nothing is queued or running.
//!
//! All state sits behind one mutex with two condition variables: one
//! wakes workers when a task arrives, the other wakes idle waiters when
//! the pending count drops to zero. The mutex is never held while a task
//! runs.

use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::core::error::{Result, StemdexError};

type Task = Box<dyn FnOnce() + Send + 'static>;

struct State {
    tasks: VecDeque<Task>,
    /// Submitted tasks that have not finished running
    pending: usize,
    shutdown: bool,
    /// Queued tasks dropped by `shutdown` before they ran
    abandoned: usize,
}

struct Shared {
    state: Mutex<State>,
    work_available: Condvar,
    idle: Condvar,
}

impl Shared {
    fn submit(&self, task: Task) {
        let mut state = self.state.lock();
        if state.shutdown {
            tracing::debug!("Work queue is shut down, dropping submitted task");
            return;
        }
        // Counted under the same lock that makes the task visible
        state.pending += 1;
        state.tasks.push_back(task);
        drop(state);
        self.work_available.notify_one();
    }

    fn wait_idle(&self) -> Result<()> {
        let mut state = self.state.lock();
        while state.pending > 0 {
            self.idle.wait(&mut state);
        }
        if state.abandoned > 0 {
            return Err(StemdexError::Interrupted(format!(
                "work queue shut down with {} unfinished tasks",
                state.abandoned
            )));
        }
        Ok(())
    }

    fn shutdown(&self) {
        let mut state = self.state.lock();
        if state.shutdown {
            return;
        }
        state.shutdown = true;

        let dropped = state.tasks.len();
        state.tasks.clear();
        state.pending -= dropped;
        state.abandoned += dropped;
        if dropped > 0 {
            tracing::warn!("Work queue shut down, abandoned {} queued tasks", dropped);
        }

        let idle = state.pending == 0;
        drop(state);

        self.work_available.notify_all();
        if idle {
            self.idle.notify_all();
        }
    }

    fn finish_task(&self) {
        let mut state = self.state.lock();
        state.pending -= 1;
        if state.pending == 0 {
            self.idle.notify_all();
        }
    }

    fn run_worker(&self, name: &str) {
        loop {
            let task = {
                let mut state = self.state.lock();
                loop {
                    if state.shutdown {
                        tracing::debug!("{} exiting", name);
                        return;
                    }
                    if let Some(task) = state.tasks.pop_front() {
                        break task;
                    }
                    self.work_available.wait(&mut state);
                }
            };

            if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(task)) {
                let message = payload
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                tracing::warn!("Task panicked on {}: {}", name, message);
            }

            self.finish_task();
        }
    }
}

/// Bounded pool of worker threads with a completion barrier
pub struct WorkQueue {
    shared: Arc<Shared>,
    workers: Vec<JoinHandle<()>>,
}

/// Cloneable handle for submitting work from inside running tasks
#[derive(Clone)]
pub struct QueueHandle {
    shared: Arc<Shared>,
}

impl QueueHandle {
    /// Enqueue a task; see [`WorkQueue::submit`]
    pub fn submit<F>(&self, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.shared.submit(Box::new(task));
    }

    /// Snapshot of the number of unfinished tasks
    pub fn pending(&self) -> usize {
        self.shared.state.lock().pending
    }
}

impl WorkQueue {
    /// Worker count used when zero workers are requested
    pub const DEFAULT_WORKERS: usize = 5;

    /// Start a pool of `workers` threads
    ///
    /// A count of zero is corrected to [`Self::DEFAULT_WORKERS`].
    ///
    /// # Errors
    ///
    /// Returns an I/O error if a worker thread cannot be spawned. Workers
    /// already started are shut down.
    pub fn new(workers: usize) -> Result<Self> {
        let workers = if workers == 0 {
            Self::DEFAULT_WORKERS
        } else {
            workers
        };

        let shared = Arc::new(Shared {
            state: Mutex::new(State {
                tasks: VecDeque::new(),
                pending: 0,
                shutdown: false,
                abandoned: 0,
            }),
            work_available: Condvar::new(),
            idle: Condvar::new(),
        });

        let mut queue = Self {
            shared,
            workers: Vec::with_capacity(workers),
        };

        for id in 0..workers {
            let shared = Arc::clone(&queue.shared);
            let name = format!("stemdex-worker-{id}");
            let handle = thread::Builder::new()
                .name(name.clone())
                .spawn(move || shared.run_worker(&name))?;
            queue.workers.push(handle);
        }

        tracing::debug!("Started work queue with {} workers", workers);
        Ok(queue)
    }

    /// Enqueue a task and return immediately
    ///
    /// Safe to call from any thread. Tasks submitted after `shutdown` are
    /// dropped without running.
    pub fn submit<F>(&self, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.shared.submit(Box::new(task));
    }

    /// Handle that running tasks can use to submit more work
    pub fn handle(&self) -> QueueHandle {
        QueueHandle {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Block until every submitted task has finished
    ///
    /// Tasks submitted by running tasks before the count reaches zero are
    /// waited for as well.
    ///
    /// # Errors
    ///
    /// `Interrupted` if `shutdown` abandoned queued tasks, since the work
    /// the caller waited for can no longer be complete.
    pub fn wait_idle(&self) -> Result<()> {
        self.shared.wait_idle()
    }

    /// Stop workers from picking up new tasks
    ///
    /// Queued tasks that have not started are dropped. Running tasks are
    /// not interrupted.
    pub fn shutdown(&self) {
        self.shared.shutdown();
    }

    /// Number of worker threads
    pub fn size(&self) -> usize {
        self.workers.len()
    }

    /// Snapshot of the number of unfinished tasks
    pub fn pending(&self) -> usize {
        self.shared.state.lock().pending
    }
}

impl Drop for WorkQueue {
    fn drop(&mut self) {
        self.shutdown();
        for worker in self.workers.drain(..) {
            if worker.join().is_err() {
                tracing::warn!("Worker thread panicked during shutdown");
            }
        }
    }
}
