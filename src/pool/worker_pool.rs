//! Fixed-size worker pool and its configuration

use crate::core::{Result, SquareJob, SumsqError};
use crate::pool::worker::{Worker, WorkerState, WorkerStats, WorkerSummary};
use crate::queue::TaskQueue;
use crate::stats::Aggregator;
use std::sync::Arc;
use std::time::Duration;

/// Configuration for a worker pool
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PoolConfig {
    /// Number of worker threads, fixed for the lifetime of the pool
    pub num_workers: usize,
    /// Thread name prefix; worker `i` is named `<prefix>-<i>`
    pub thread_name_prefix: String,
    /// Simulated compute time per unit of job value.
    /// Default: 1s
    pub compute_unit: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            num_workers: 1,
            thread_name_prefix: "worker".to_string(),
            compute_unit: Duration::from_secs(1),
        }
    }
}

impl PoolConfig {
    /// Create a new configuration with the given number of workers.
    ///
    /// Zero is accepted here and rejected by [`validate`](Self::validate).
    #[must_use]
    pub fn new(num_workers: usize) -> Self {
        Self {
            num_workers,
            ..Default::default()
        }
    }

    /// Set thread name prefix
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_thread_name_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.thread_name_prefix = prefix.into();
        self
    }

    /// Set the simulated compute time per unit of job value.
    ///
    /// A job with value `n > 0` keeps its worker busy for `n * unit`.
    /// `Duration::ZERO` disables the delay entirely.
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_compute_unit(mut self, unit: Duration) -> Self {
        self.compute_unit = unit;
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.num_workers == 0 {
            return Err(SumsqError::invalid_config(
                "num_workers",
                "Number of workers must be greater than 0",
            ));
        }
        if self.thread_name_prefix.is_empty() {
            return Err(SumsqError::invalid_config(
                "thread_name_prefix",
                "Thread name prefix must not be empty",
            ));
        }
        Ok(())
    }
}

/// A fixed set of workers draining one queue into one aggregator.
///
/// The pool does not own the queue or the aggregator; both are injected so
/// the producer keeps its own handle to the queue and the caller reads the
/// aggregator once the pool has been joined.
#[derive(Debug)]
pub struct WorkerPool {
    workers: Vec<Worker>,
}

impl WorkerPool {
    /// Validate `config` and spawn exactly `config.num_workers` workers.
    ///
    /// If a spawn fails part way, the queue is marked done so the workers
    /// already started can exit, and the spawn error is returned.
    pub fn spawn(
        config: &PoolConfig,
        queue: Arc<TaskQueue<SquareJob>>,
        aggregator: Arc<Aggregator>,
    ) -> Result<Self> {
        config.validate()?;

        let mut workers = Vec::with_capacity(config.num_workers);
        for id in 0..config.num_workers {
            log::info!("creating worker {}", id);
            let worker = Worker::new(
                id,
                format!("{}-{}", config.thread_name_prefix, id),
                Arc::clone(&queue),
                Arc::clone(&aggregator),
                config.compute_unit,
            );
            match worker {
                Ok(worker) => workers.push(worker),
                Err(e) => {
                    log::error!("failed to spawn worker {}: {}", id, e);
                    queue.mark_no_more_jobs();
                    return Err(e);
                }
            }
        }

        #[cfg(feature = "tracing")]
        crate::tracing::metrics::record_pool_start(config.num_workers);

        Ok(Self { workers })
    }

    /// Number of workers in the pool
    pub fn num_workers(&self) -> usize {
        self.workers.len()
    }

    /// Live statistics for every worker, in ordinal order
    pub fn stats(&self) -> Vec<Arc<WorkerStats>> {
        self.workers.iter().map(Worker::stats).collect()
    }

    /// Current state of every worker, in ordinal order
    pub fn states(&self) -> Vec<WorkerState> {
        self.workers.iter().map(Worker::state).collect()
    }

    /// Total jobs processed across all workers so far
    pub fn total_jobs_processed(&self) -> u64 {
        self.workers
            .iter()
            .map(|w| w.stats().jobs_processed())
            .sum()
    }

    /// Wait for every worker to exit.
    ///
    /// Returns only after the producer has marked the queue done and the queue
    /// has drained; calling it earlier blocks until that happens. Every worker
    /// is joined even if one of them panicked; the first failure is reported.
    pub fn join(self) -> Result<Vec<WorkerSummary>> {
        let mut summaries = Vec::with_capacity(self.workers.len());
        let mut first_error = None;

        for worker in self.workers {
            match worker.join() {
                Ok(summary) => summaries.push(summary),
                Err(e) => {
                    log::error!("{}", e);
                    first_error.get_or_insert(e);
                }
            }
        }

        if let Some(e) = first_error {
            return Err(e);
        }

        #[cfg(feature = "tracing")]
        crate::tracing::metrics::record_pool_shutdown(
            summaries.iter().map(|s| s.jobs_processed).sum(),
        );

        Ok(summaries)
    }
}
