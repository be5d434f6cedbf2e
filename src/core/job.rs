//! The unit of work processed by the pool

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// A single number waiting to be squared
///
/// Jobs are plain values: the producer owns one until it is submitted, the
/// queue owns it while it waits, and exactly one worker owns it after `take`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SquareJob {
    value: i64,
}

impl SquareJob {
    /// Create a job for `value`
    pub const fn new(value: i64) -> Self {
        Self { value }
    }

    /// The input value
    pub const fn value(&self) -> i64 {
        self.value
    }

    /// The square of the input, wrapping on overflow
    pub const fn square(&self) -> i64 {
        self.value.wrapping_mul(self.value)
    }

    /// How long the simulated computation takes.
    ///
    /// The delay is `unit` multiplied by the value. Non-positive values
    /// complete immediately.
    pub fn compute_delay(&self, unit: Duration) -> Duration {
        if self.value <= 0 || unit.is_zero() {
            return Duration::ZERO;
        }
        let factor = u32::try_from(self.value).unwrap_or(u32::MAX);
        unit.saturating_mul(factor)
    }
}

impl From<i64> for SquareJob {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for SquareJob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SquareJob({})", self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square() {
        assert_eq!(SquareJob::new(3).square(), 9);
        assert_eq!(SquareJob::new(-4).square(), 16);
        assert_eq!(SquareJob::new(0).square(), 0);
    }

    #[test]
    fn test_square_wraps() {
        let job = SquareJob::new(i64::MAX);
        assert_eq!(job.square(), i64::MAX.wrapping_mul(i64::MAX));
    }

    #[test]
    fn test_compute_delay() {
        let unit = Duration::from_millis(10);
        assert_eq!(SquareJob::new(3).compute_delay(unit), Duration::from_millis(30));
        assert_eq!(SquareJob::new(0).compute_delay(unit), Duration::ZERO);
        assert_eq!(SquareJob::new(-5).compute_delay(unit), Duration::ZERO);
        assert_eq!(SquareJob::new(7).compute_delay(Duration::ZERO), Duration::ZERO);
    }

    #[test]
    fn test_display() {
        assert_eq!(SquareJob::from(-2).to_string(), "SquareJob(-2)");
    }
}
