//! Aggregate statistics over processed jobs.
//!
//! This module provides [`Aggregator`], the shared accumulator every worker
//! records into, and [`Snapshot`], the plain value read back once the run is
//! over.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Aggregate values over every recorded job.
///
/// # Sentinels
///
/// An empty snapshot has `min == i64::MAX` and `max == i64::MIN`, the identity
/// values for the respective comparison. Those numbers carry no meaning on
/// their own; use [`min_value`](Self::min_value) and
/// [`max_value`](Self::max_value) to distinguish an empty run.
///
/// The sentinels are the 64-bit limits, so an empty run renders as
/// `0 0 9223372036854775807 -9223372036854775808`, not the 32-bit
/// `2147483647 -2147483648` that `INT_MAX`/`INT_MIN` based tools print.
///
/// # Overflow
///
/// `sum` accumulates with wrapping arithmetic. Inputs whose squares exceed the
/// `i64` range wrap silently.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Running sum of squares
    pub sum: i64,

    /// Number of odd inputs (negative odd inputs included)
    pub odd_count: u64,

    /// Smallest input seen, `i64::MAX` when empty
    pub min: i64,

    /// Largest input seen, `i64::MIN` when empty
    pub max: i64,

    /// Number of jobs recorded
    pub jobs_recorded: u64,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            sum: 0,
            odd_count: 0,
            min: i64::MAX,
            max: i64::MIN,
            jobs_recorded: 0,
        }
    }
}

impl Snapshot {
    /// Whether no job has been recorded yet
    pub fn is_empty(&self) -> bool {
        self.jobs_recorded == 0
    }

    /// Smallest input, or `None` for an empty run
    pub fn min_value(&self) -> Option<i64> {
        (!self.is_empty()).then_some(self.min)
    }

    /// Largest input, or `None` for an empty run
    pub fn max_value(&self) -> Option<i64> {
        (!self.is_empty()).then_some(self.max)
    }

    fn apply(&mut self, value: i64) {
        self.sum = self.sum.wrapping_add(value.wrapping_mul(value));
        if value % 2 != 0 {
            self.odd_count += 1;
        }
        if value < self.min {
            self.min = value;
        }
        if value > self.max {
            self.max = value;
        }
        self.jobs_recorded += 1;
    }
}

/// Renders `sum odd_count min max`, the result line of a run.
impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.sum, self.odd_count, self.min, self.max)
    }
}

/// Thread-safe accumulator shared by all workers.
///
/// All four statistics change together under one lock, so no reader can see a
/// partially applied job. The lock is separate from the task queue's lock and
/// is never taken while holding it.
#[derive(Debug, Default)]
pub struct Aggregator {
    totals: Mutex<Snapshot>,
}

impl Aggregator {
    /// Creates an aggregator holding identity values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one processed input into the totals.
    pub fn record(&self, value: i64) {
        self.totals.lock().apply(value);
    }

    /// Returns a copy of the current totals.
    ///
    /// The value is only final once every worker has exited; reading earlier
    /// yields a consistent but partial view.
    pub fn snapshot(&self) -> Snapshot {
        *self.totals.lock()
    }
}
