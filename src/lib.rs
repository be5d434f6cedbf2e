//! # Square-Sum Pool
//!
//! A fixed-size worker pool that squares a stream of integers appended by a
//! single producer and accumulates the sum of squares, the number of odd
//! inputs, and the smallest and largest input.
//!
//! ## Features
//!
//! - **Task Queue**: Unbounded FIFO behind a mutex, with a condition variable
//!   waking idle workers and a level-triggered "producer done" flag
//! - **Aggregator**: Separate lock for the statistics, never held together
//!   with the queue lock
//! - **Worker Pool**: N identical workers that drain the queue and exit once
//!   input is exhausted and the queue is empty
//! - **Driver**: Script replay (`p <n>` / `w <n>`) and the `par_sumsq` binary
//!
//! ## Quick Start
//!
//! ```rust
//! use sumsq_pool::prelude::*;
//! use std::time::Duration;
//!
//! # fn main() -> Result<()> {
//! let config = PoolConfig::new(4).with_compute_unit(Duration::ZERO);
//! let mut pool = SquarePool::start(config)?;
//!
//! for value in 1..=10 {
//!     pool.submit(value);
//! }
//!
//! let report = pool.finish()?;
//! assert_eq!(report.snapshot.sum, 385);
//! assert_eq!(report.snapshot.odd_count, 5);
//! println!("{}", report.snapshot);
//! # Ok(())
//! # }
//! ```
//!
//! ## Building Blocks
//!
//! The queue, the aggregator and the workers can be wired by hand when the
//! producer needs direct access to the queue:
//!
//! ```rust
//! use sumsq_pool::prelude::*;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! # fn main() -> Result<()> {
//! let queue = Arc::new(TaskQueue::new());
//! let aggregator = Arc::new(Aggregator::new());
//! let config = PoolConfig::new(2).with_compute_unit(Duration::ZERO);
//! let workers = WorkerPool::spawn(&config, Arc::clone(&queue), Arc::clone(&aggregator))?;
//!
//! queue.submit(SquareJob::new(-3));
//! queue.mark_no_more_jobs();
//! workers.join()?;
//!
//! assert_eq!(aggregator.snapshot().to_string(), "9 1 -3 -3");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod core;
pub mod driver;
pub mod pool;
pub mod prelude;
pub mod queue;
pub mod stats;
#[cfg(feature = "tracing")]
pub mod tracing;

pub use core::{Result, SquareJob, SumsqError};
pub use driver::{Command, Driver, DriverConfig};
pub use pool::{PoolConfig, RunReport, SquarePool, WorkerPool, WorkerState};
pub use queue::{Take, TaskQueue};
pub use stats::{Aggregator, Snapshot};
