//! Convenient re-exports for common types

pub use crate::core::{Result, SquareJob, SumsqError};
pub use crate::driver::{Command, Driver, DriverConfig};
pub use crate::pool::{
    PoolConfig, RunReport, SquarePool, WorkerPool, WorkerState, WorkerStats, WorkerSummary,
};
pub use crate::queue::{Take, TaskQueue};
pub use crate::stats::{Aggregator, Snapshot};
