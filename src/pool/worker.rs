//! Worker thread implementation

use crate::core::{Result, SquareJob, SumsqError};
use crate::queue::{Take, TaskQueue};
use crate::stats::Aggregator;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

#[cfg(feature = "tracing")]
use tracing::{span, Level};

/// Where a worker is in its loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkerState {
    /// Blocked in (or about to call) `TaskQueue::take`
    WaitingForWork,
    /// Simulating the computation or recording the result
    Processing,
    /// Terminal; the thread has returned or is about to
    Exited,
}

impl WorkerState {
    fn as_u8(self) -> u8 {
        match self {
            WorkerState::WaitingForWork => 0,
            WorkerState::Processing => 1,
            WorkerState::Exited => 2,
        }
    }

    fn from_u8(raw: u8) -> Self {
        match raw {
            0 => WorkerState::WaitingForWork,
            1 => WorkerState::Processing,
            _ => WorkerState::Exited,
        }
    }
}

/// Live statistics for a worker thread
#[derive(Debug)]
pub struct WorkerStats {
    state: AtomicU8,
    jobs_processed: AtomicU64,
    busy_time_us: AtomicU64,
}

impl Default for WorkerStats {
    fn default() -> Self {
        Self {
            state: AtomicU8::new(WorkerState::WaitingForWork.as_u8()),
            jobs_processed: AtomicU64::new(0),
            busy_time_us: AtomicU64::new(0),
        }
    }
}

impl WorkerStats {
    /// Create new worker statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Current loop state
    pub fn state(&self) -> WorkerState {
        WorkerState::from_u8(self.state.load(Ordering::Acquire))
    }

    fn set_state(&self, state: WorkerState) {
        self.state.store(state.as_u8(), Ordering::Release);
    }

    /// Total jobs processed
    pub fn jobs_processed(&self) -> u64 {
        self.jobs_processed.load(Ordering::Relaxed)
    }

    /// Total time spent processing, in microseconds
    pub fn busy_time_us(&self) -> u64 {
        self.busy_time_us.load(Ordering::Relaxed)
    }

    fn record_job(&self, elapsed: Duration) {
        self.jobs_processed.fetch_add(1, Ordering::Relaxed);
        self.busy_time_us
            .fetch_add(elapsed.as_micros() as u64, Ordering::Relaxed);
    }
}

/// Final per-worker figures, returned when the worker is joined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerSummary {
    /// Worker ordinal
    pub id: usize,
    /// Jobs this worker took from the queue and recorded
    pub jobs_processed: u64,
    /// Time spent processing, in microseconds
    pub busy_time_us: u64,
}

/// Everything a worker thread needs, moved into it at spawn time
struct WorkerContext {
    id: usize,
    queue: Arc<TaskQueue<SquareJob>>,
    aggregator: Arc<Aggregator>,
    compute_unit: Duration,
    stats: Arc<WorkerStats>,
}

/// A worker thread that squares jobs from a shared queue
#[derive(Debug)]
pub struct Worker {
    id: usize,
    thread: Option<thread::JoinHandle<()>>,
    stats: Arc<WorkerStats>,
}

impl Worker {
    /// Create and start a new worker
    ///
    /// # Arguments
    ///
    /// * `id` - Ordinal of this worker, used for the thread name and logs
    /// * `thread_name` - Name given to the OS thread
    /// * `queue` - Queue the worker drains
    /// * `aggregator` - Accumulator the worker records into
    /// * `compute_unit` - Simulated delay per unit of input value
    ///
    /// # Shutdown Behavior
    ///
    /// The worker exits only once the queue reports [`Take::Done`], i.e. the
    /// producer is done and every queued job has been taken.
    pub fn new(
        id: usize,
        thread_name: String,
        queue: Arc<TaskQueue<SquareJob>>,
        aggregator: Arc<Aggregator>,
        compute_unit: Duration,
    ) -> Result<Self> {
        let stats = Arc::new(WorkerStats::new());
        let context = WorkerContext {
            id,
            queue,
            aggregator,
            compute_unit,
            stats: Arc::clone(&stats),
        };

        let thread = thread::Builder::new()
            .name(thread_name)
            .spawn(move || Self::run(context))
            .map_err(|e| SumsqError::spawn_with_source(id, "Cannot create thread", e))?;

        Ok(Self {
            id,
            thread: Some(thread),
            stats,
        })
    }

    /// Get worker ID
    pub fn id(&self) -> usize {
        self.id
    }

    /// Get worker statistics
    pub fn stats(&self) -> Arc<WorkerStats> {
        Arc::clone(&self.stats)
    }

    /// Current loop state
    pub fn state(&self) -> WorkerState {
        self.stats.state()
    }

    /// Join the worker thread
    pub fn join(mut self) -> Result<WorkerSummary> {
        if let Some(thread) = self.thread.take() {
            thread
                .join()
                .map_err(|panic_info| SumsqError::join(self.id, panic_message(&*panic_info)))?;
        }
        Ok(WorkerSummary {
            id: self.id,
            jobs_processed: self.stats.jobs_processed(),
            busy_time_us: self.stats.busy_time_us(),
        })
    }

    /// Main worker loop
    ///
    /// `WaitingForWork -> Processing -> WaitingForWork -> ... -> Exited`
    fn run(ctx: WorkerContext) {
        #[cfg(feature = "tracing")]
        let worker_span = span!(Level::DEBUG, "worker", id = ctx.id);
        #[cfg(feature = "tracing")]
        let _guard = worker_span.enter();

        loop {
            ctx.stats.set_state(WorkerState::WaitingForWork);
            log::trace!("worker {} waiting", ctx.id);

            let job = match ctx.queue.take() {
                Take::Job(job) => job,
                Take::Done => break,
            };

            ctx.stats.set_state(WorkerState::Processing);
            #[cfg(feature = "tracing")]
            crate::tracing::metrics::record_worker_busy(ctx.id);
            log::debug!("worker {} processing value {}", ctx.id, job.value());

            let start = Instant::now();
            thread::sleep(job.compute_delay(ctx.compute_unit));
            ctx.aggregator.record(job.value());
            ctx.stats.record_job(start.elapsed());

            #[cfg(feature = "tracing")]
            crate::tracing::metrics::record_worker_idle(ctx.id, start.elapsed());
        }

        ctx.stats.set_state(WorkerState::Exited);
        log::debug!(
            "worker {} exiting after {} jobs",
            ctx.id,
            ctx.stats.jobs_processed()
        );
    }
}

fn panic_message(panic_info: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

impl Drop for Worker {
    fn drop(&mut self) {
        if let Some(thread) = self.thread.take() {
            const JOIN_TIMEOUT: Duration = Duration::from_secs(5);

            let start = Instant::now();
            loop {
                if thread.is_finished() {
                    if let Err(panic_info) = thread.join() {
                        log::error!(
                            "worker {} panicked: {}",
                            self.id,
                            panic_message(&*panic_info)
                        );
                    }
                    break;
                }

                if start.elapsed() >= JOIN_TIMEOUT {
                    log::warn!(
                        "worker {} did not finish within {}s during drop; thread may be leaked",
                        self.id,
                        JOIN_TIMEOUT.as_secs()
                    );
                    break;
                }

                thread::sleep(Duration::from_millis(10));
            }
        }
    }
}
