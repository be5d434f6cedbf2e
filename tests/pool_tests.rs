//! Scenario and liveness tests for the worker pool

use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use sumsq_pool::prelude::*;

/// Upper bound for anything that should happen "promptly"
const LIVENESS_TIMEOUT: Duration = Duration::from_secs(5);

fn fast_config(num_workers: usize) -> PoolConfig {
    PoolConfig::new(num_workers).with_compute_unit(Duration::ZERO)
}

fn run_values(num_workers: usize, values: &[i64]) -> RunReport {
    let mut pool = SquarePool::start(fast_config(num_workers)).expect("Failed to start pool");
    for &value in values {
        pool.submit(value);
    }
    pool.no_more_jobs();
    pool.finish().expect("Failed to finish pool")
}

/// Run `f` on a helper thread and fail the test if it does not return in time
fn within_timeout<T: Send + 'static>(f: impl FnOnce() -> T + Send + 'static) -> T {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let _ = tx.send(f());
    });
    rx.recv_timeout(LIVENESS_TIMEOUT)
        .expect("operation did not complete within the liveness timeout")
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_three_jobs_two_workers() {
    let report = run_values(2, &[3, 4, -2]);

    assert_eq!(report.snapshot.sum, 29);
    assert_eq!(report.snapshot.odd_count, 1);
    assert_eq!(report.snapshot.min, -2);
    assert_eq!(report.snapshot.max, 4);
    assert_eq!(report.snapshot.to_string(), "29 1 -2 4");
}

#[test]
fn test_zero_jobs_reports_sentinels() {
    let report = run_values(3, &[]);

    assert_eq!(report.snapshot.sum, 0);
    assert_eq!(report.snapshot.odd_count, 0);
    assert_eq!(report.snapshot.min, i64::MAX);
    assert_eq!(report.snapshot.max, i64::MIN);
    assert_eq!(report.snapshot.min_value(), None);
    assert_eq!(report.workers.len(), 3);
}

#[test]
fn test_one_worker_matches_eight_workers() {
    let values: Vec<i64> = (-50..=50).collect();
    let single = run_values(1, &values);
    let many = run_values(8, &values);

    assert_eq!(single.snapshot, many.snapshot);
    assert_eq!(single.snapshot.jobs_recorded, 101);
}

// ============================================================================
// Completeness and drain
// ============================================================================

#[test]
fn test_every_job_recorded_once() {
    let values: Vec<i64> = (0..500).collect();
    let report = run_values(4, &values);

    assert_eq!(report.snapshot.jobs_recorded, 500);
    let per_worker: u64 = report.workers.iter().map(|w| w.jobs_processed).sum();
    assert_eq!(per_worker, 500);
}

#[test]
fn test_queued_jobs_drain_before_exit() {
    let queue = Arc::new(TaskQueue::new());
    let aggregator = Arc::new(Aggregator::new());

    // Fill the queue before any worker exists, then mark done immediately
    for value in 1..=20 {
        queue.submit(SquareJob::new(value));
    }
    queue.mark_no_more_jobs();

    let config = PoolConfig::new(4).with_compute_unit(Duration::from_millis(1));
    let workers = WorkerPool::spawn(&config, Arc::clone(&queue), Arc::clone(&aggregator))
        .expect("Failed to spawn pool");
    within_timeout(move || workers.join().expect("Failed to join pool"));

    assert!(queue.is_empty());
    let snapshot = aggregator.snapshot();
    assert_eq!(snapshot.jobs_recorded, 20);
    assert_eq!(snapshot.sum, (1..=20_i64).map(|v| v * v).sum::<i64>());
}

#[test]
fn test_slow_jobs_drain_after_mark() {
    let mut pool = SquarePool::start(
        PoolConfig::new(2).with_compute_unit(Duration::from_millis(10)),
    )
    .expect("Failed to start pool");
    for value in [5, 5, 5, 5] {
        pool.submit(value);
    }
    pool.no_more_jobs();

    let report = within_timeout(move || pool.finish().expect("Failed to finish pool"));
    assert_eq!(report.snapshot.jobs_recorded, 4);
    assert_eq!(report.snapshot.sum, 100);
}

// ============================================================================
// Liveness
// ============================================================================

#[test]
fn test_idle_worker_wakes_on_submit() {
    let queue = Arc::new(TaskQueue::new());
    let aggregator = Arc::new(Aggregator::new());
    let workers = WorkerPool::spawn(&fast_config(1), Arc::clone(&queue), Arc::clone(&aggregator))
        .expect("Failed to spawn pool");

    let wait_for_recorded = |count: u64| {
        let deadline = Instant::now() + LIVENESS_TIMEOUT;
        while aggregator.snapshot().jobs_recorded < count {
            assert!(Instant::now() < deadline, "worker was not woken by submit");
            thread::sleep(Duration::from_millis(1));
        }
    };

    // A first job proves the thread is running and has looped back to the queue
    queue.submit(SquareJob::new(6));
    wait_for_recorded(1);

    // Let the worker block on the now empty queue; it only returns to this
    // state after finishing a job, so the initial value cannot satisfy it
    thread::sleep(Duration::from_millis(50));
    assert_eq!(workers.total_jobs_processed(), 1);
    assert_eq!(workers.states(), vec![WorkerState::WaitingForWork]);
    assert!(queue.is_empty());

    queue.submit(SquareJob::new(-5));
    wait_for_recorded(2);

    queue.mark_no_more_jobs();
    within_timeout(move || workers.join().expect("Failed to join pool"));
    assert_eq!(aggregator.snapshot().sum, 61);
}

#[test]
fn test_idle_workers_wake_on_no_more_jobs() {
    let queue = Arc::new(TaskQueue::new());
    let aggregator = Arc::new(Aggregator::new());
    let workers = WorkerPool::spawn(&fast_config(6), Arc::clone(&queue), aggregator)
        .expect("Failed to spawn pool");

    thread::sleep(Duration::from_millis(50));
    queue.mark_no_more_jobs();

    let summaries = within_timeout(move || workers.join().expect("Failed to join pool"));
    assert_eq!(summaries.len(), 6);
}

#[test]
fn test_paced_producer() {
    let mut pool = SquarePool::start(fast_config(3)).expect("Failed to start pool");
    for batch in 0..5_i64 {
        for value in 0..10 {
            pool.submit(batch * 10 + value);
        }
        thread::sleep(Duration::from_millis(5));
    }

    let report = within_timeout(move || pool.finish().expect("Failed to finish pool"));
    assert_eq!(report.snapshot.jobs_recorded, 50);
    assert_eq!(report.snapshot.min, 0);
    assert_eq!(report.snapshot.max, 49);
    assert!(report
        .workers
        .iter()
        .all(|w| w.jobs_processed <= 50));
}
