//! Worker pool and worker implementations

pub mod square_pool;
pub mod worker;
pub mod worker_pool;

pub use square_pool::{RunReport, SquarePool};
pub use worker::{Worker, WorkerState, WorkerStats, WorkerSummary};
pub use worker_pool::{PoolConfig, WorkerPool};
