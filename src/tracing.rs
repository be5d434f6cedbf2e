//! Tracing integration for observability.
//!
//! With the `tracing` feature enabled, every worker runs inside a `worker`
//! span and the pool emits the metric events below. Without it, the crate
//! logs through the `log` facade only.
//!
//! # Example
//!
//! ```rust,ignore
//! use sumsq_pool::prelude::*;
//! use tracing_subscriber::{fmt, prelude::*, EnvFilter};
//!
//! tracing_subscriber::registry()
//!     .with(fmt::layer())
//!     .with(EnvFilter::from_default_env()
//!         .add_directive("sumsq_pool=trace".parse().unwrap()))
//!     .init();
//!
//! let pool = SquarePool::start(PoolConfig::new(4))?;
//! ```

/// Metrics recording functions for observability.
///
/// These functions emit tracing events that can be consumed by
/// metrics collection systems like Prometheus via tracing-opentelemetry.
pub mod metrics {
    use std::time::Duration;

    /// Records a job submission event.
    #[inline]
    pub fn record_submission(queue_depth: usize) {
        tracing::trace!(
            counter.jobs_submitted = 1,
            gauge.queue_depth = queue_depth as i64,
            "job submitted"
        );
    }

    /// Records worker becoming busy.
    #[inline]
    pub fn record_worker_busy(worker_id: usize) {
        tracing::trace!(
            gauge.workers_busy = 1,
            worker_id = worker_id,
            "worker busy"
        );
    }

    /// Records worker returning to the queue after recording a job.
    #[inline]
    pub fn record_worker_idle(worker_id: usize, busy_for: Duration) {
        tracing::trace!(
            gauge.workers_busy = -1i64,
            counter.jobs_recorded = 1,
            histogram.job_duration_ms = busy_for.as_millis() as u64,
            worker_id = worker_id,
            "worker idle"
        );
    }

    /// Records pool startup.
    #[inline]
    pub fn record_pool_start(num_workers: usize) {
        tracing::info!(workers = num_workers, "worker pool started");
    }

    /// Records pool shutdown.
    #[inline]
    pub fn record_pool_shutdown(jobs_processed: u64) {
        tracing::info!(
            jobs_processed = jobs_processed,
            "worker pool shutdown complete"
        );
    }
}
