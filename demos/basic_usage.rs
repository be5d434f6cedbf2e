//! Basic pool usage example
//!
//! Demonstrates starting a pool, feeding it jobs with producer pauses, and
//! reading the per-worker and aggregate results.
//!
//! Run with: cargo run --example basic_usage

use std::thread;
use std::time::Duration;
use sumsq_pool::prelude::*;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("=== Square-Sum Pool - Basic Usage Example ===\n");

    let config = PoolConfig::new(3)
        .with_thread_name_prefix("squarer")
        .with_compute_unit(Duration::from_millis(20));
    let mut pool = SquarePool::start(config)?;

    println!("1. Submitting first batch");
    for value in [1, 2, 3, 4, 5] {
        pool.submit(value);
    }
    println!("   pending: {}", pool.pending_jobs());

    println!("\n2. Producer pauses");
    thread::sleep(Duration::from_millis(100));
    println!("   worker states: {:?}", pool.worker_states());

    println!("\n3. Submitting second batch");
    for value in [-7, 0, 9] {
        pool.submit(value);
    }

    println!("\n4. Finishing");
    let report = pool.finish()?;
    for worker in &report.workers {
        println!(
            "   worker {}: {} jobs, {}us busy",
            worker.id, worker.jobs_processed, worker.busy_time_us
        );
    }
    println!("\nResult: {}", report.snapshot);

    Ok(())
}
