//! Single-producer facade over the queue, the aggregator and the workers

use crate::core::{Result, SquareJob};
use crate::pool::worker::{WorkerState, WorkerSummary};
use crate::pool::worker_pool::{PoolConfig, WorkerPool};
use crate::queue::TaskQueue;
use crate::stats::{Aggregator, Snapshot};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Outcome of a complete run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// Final aggregate values
    pub snapshot: Snapshot,
    /// Per-worker figures, in ordinal order
    pub workers: Vec<WorkerSummary>,
    /// Jobs handed to the queue by the producer
    pub jobs_submitted: u64,
    /// When the workers were spawned
    pub started_at: DateTime<Utc>,
    /// When the last worker was joined
    pub finished_at: DateTime<Utc>,
}

/// Owns one queue, one aggregator and the workers bound to them.
///
/// The owner acts as the single producer: it calls [`submit`](Self::submit)
/// for every job, then [`finish`](Self::finish) to signal the end of input,
/// wait for the workers and read the totals.
///
/// # Example
///
/// ```rust
/// use sumsq_pool::prelude::*;
/// use std::time::Duration;
///
/// # fn main() -> Result<()> {
/// let config = PoolConfig::new(2).with_compute_unit(Duration::ZERO);
/// let mut pool = SquarePool::start(config)?;
///
/// for value in [3, 4, -2] {
///     pool.submit(value);
/// }
///
/// let report = pool.finish()?;
/// assert_eq!(report.snapshot.to_string(), "29 1 -2 4");
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct SquarePool {
    queue: Arc<TaskQueue<SquareJob>>,
    aggregator: Arc<Aggregator>,
    workers: Option<WorkerPool>,
    jobs_submitted: u64,
    started_at: DateTime<Utc>,
}

impl SquarePool {
    /// Create the shared state and spawn the workers.
    pub fn start(config: PoolConfig) -> Result<Self> {
        let queue = Arc::new(TaskQueue::new());
        let aggregator = Arc::new(Aggregator::new());
        let started_at = Utc::now();
        let workers = WorkerPool::spawn(&config, Arc::clone(&queue), Arc::clone(&aggregator))?;

        Ok(Self {
            queue,
            aggregator,
            workers: Some(workers),
            jobs_submitted: 0,
            started_at,
        })
    }

    /// Hand one job to the workers.
    ///
    /// Must not be called after [`no_more_jobs`](Self::no_more_jobs).
    pub fn submit(&mut self, value: i64) {
        log::debug!("adding task: {}", value);
        self.queue.submit(SquareJob::new(value));
        self.jobs_submitted += 1;

        #[cfg(feature = "tracing")]
        crate::tracing::metrics::record_submission(self.queue.len());
    }

    /// Signal that the input is exhausted.
    ///
    /// Workers finish whatever is still queued and then exit.
    pub fn no_more_jobs(&self) {
        if !self.queue.is_producer_done() {
            log::info!("no more tasks ({} submitted)", self.jobs_submitted);
            self.queue.mark_no_more_jobs();
        }
    }

    /// Jobs submitted so far
    pub fn jobs_submitted(&self) -> u64 {
        self.jobs_submitted
    }

    /// Jobs still waiting in the queue
    pub fn pending_jobs(&self) -> usize {
        self.queue.len()
    }

    /// Current state of every worker
    pub fn worker_states(&self) -> Vec<WorkerState> {
        self.workers
            .as_ref()
            .map(WorkerPool::states)
            .unwrap_or_default()
    }

    /// Mark the input exhausted (if not done already), wait for every worker
    /// and return the final totals.
    pub fn finish(mut self) -> Result<RunReport> {
        self.no_more_jobs();

        log::info!("waiting for workers to finish");
        let workers = match self.workers.take() {
            Some(pool) => pool.join()?,
            None => Vec::new(),
        };

        Ok(RunReport {
            snapshot: self.aggregator.snapshot(),
            workers,
            jobs_submitted: self.jobs_submitted,
            started_at: self.started_at,
            finished_at: Utc::now(),
        })
    }
}

impl Drop for SquarePool {
    fn drop(&mut self) {
        // Without this, workers blocked in `take` would never return.
        if self.workers.is_some() {
            self.queue.mark_no_more_jobs();
        }
    }
}
