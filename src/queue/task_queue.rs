//! Unbounded FIFO guarded by a mutex and a "data available" condition variable.

use super::Take;
use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;
use std::fmt;

struct QueueState<T> {
    jobs: VecDeque<T>,
    producer_done: bool,
}

/// A thread-safe unbounded FIFO of pending jobs.
///
/// The job sequence and the `producer_done` flag live behind a single lock and
/// are never observed without it. Both [`submit`](Self::submit) and
/// [`mark_no_more_jobs`](Self::mark_no_more_jobs) broadcast to every waiter;
/// waiters re-check the predicate on each wake-up instead of assuming
/// exclusive delivery.
///
/// # Producer contract
///
/// There is a single producer. `mark_no_more_jobs` is called once, after the
/// last `submit`. Submitting after that point is a contract violation: a
/// worker may already have exited on the strength of the flag. Debug builds
/// assert on it; release builds enqueue the job anyway.
pub struct TaskQueue<T> {
    state: Mutex<QueueState<T>>,
    available: Condvar,
}

impl<T> TaskQueue<T> {
    /// Creates an empty queue that still expects jobs.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(QueueState {
                jobs: VecDeque::new(),
                producer_done: false,
            }),
            available: Condvar::new(),
        }
    }

    /// Appends `job` to the tail and wakes waiting workers.
    pub fn submit(&self, job: T) {
        let mut state = self.state.lock();
        debug_assert!(
            !state.producer_done,
            "submit called after mark_no_more_jobs"
        );
        state.jobs.push_back(job);
        self.available.notify_all();
    }

    /// Records that no further jobs will arrive and wakes every waiter so it
    /// can re-evaluate the exit condition.
    pub fn mark_no_more_jobs(&self) {
        let mut state = self.state.lock();
        state.producer_done = true;
        self.available.notify_all();
    }

    /// Blocks until a job is available or the queue is finished.
    ///
    /// Returns [`Take::Job`] with the head of the queue as long as jobs remain,
    /// even after the producer is done, so queued work always drains before
    /// [`Take::Done`] is handed out.
    pub fn take(&self) -> Take<T> {
        let mut state = self.state.lock();
        while state.jobs.is_empty() && !state.producer_done {
            self.available.wait(&mut state);
        }
        match state.jobs.pop_front() {
            Some(job) => Take::Job(job),
            None => Take::Done,
        }
    }

    /// Number of jobs currently waiting
    pub fn len(&self) -> usize {
        self.state.lock().jobs.len()
    }

    /// Whether no jobs are currently waiting
    pub fn is_empty(&self) -> bool {
        self.state.lock().jobs.is_empty()
    }

    /// Whether [`mark_no_more_jobs`](Self::mark_no_more_jobs) has been called
    pub fn is_producer_done(&self) -> bool {
        self.state.lock().producer_done
    }
}

impl<T> Default for TaskQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for TaskQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("TaskQueue")
            .field("pending", &state.jobs.len())
            .field("producer_done", &state.producer_done)
            .finish()
    }
}
