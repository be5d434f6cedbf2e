//! Shared FIFO task queue between the producer and the workers.
//!
//! The queue pairs an unbounded FIFO with a level-triggered `producer_done`
//! flag. A worker that finds the queue empty either waits (more work may still
//! arrive) or stops (the producer has finished), so any number of workers can
//! observe termination without sentinel values in the queue itself.
//!
//! ```rust
//! use sumsq_pool::queue::{Take, TaskQueue};
//!
//! let queue = TaskQueue::new();
//! queue.submit(3_i64);
//! queue.mark_no_more_jobs();
//!
//! assert_eq!(queue.take(), Take::Job(3));
//! assert_eq!(queue.take(), Take::Done);
//! ```

mod task_queue;

pub use task_queue::TaskQueue;

/// Outcome of a blocking [`TaskQueue::take`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Take<T> {
    /// The head of the queue, now owned by the caller
    Job(T),
    /// The queue is drained and the producer has finished
    Done,
}

impl<T> Take<T> {
    /// Returns the job, if any
    pub fn into_job(self) -> Option<T> {
        match self {
            Take::Job(job) => Some(job),
            Take::Done => None,
        }
    }

    /// Whether this is the exit signal
    pub fn is_done(&self) -> bool {
        matches!(self, Take::Done)
    }
}
