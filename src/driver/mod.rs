//! The producer side: turns a job script into pool calls.
//!
//! [`Driver`] owns the whole lifecycle of a run: it starts the pool, replays
//! the script (submitting jobs and pausing where told to), signals the end of
//! input exactly once, waits for every worker and returns the totals.

mod script;

pub use script::{load_script, parse_script, Command};

use crate::core::Result;
use crate::pool::{PoolConfig, RunReport, SquarePool};
use std::thread;
use std::time::Duration;

/// Configuration for a driven run
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DriverConfig {
    /// Worker count and naming
    pub pool: PoolConfig,
    /// Length of one `w` unit.
    /// Default: 1s
    pub wait_unit: Duration,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            pool: PoolConfig::default(),
            wait_unit: Duration::from_secs(1),
        }
    }
}

impl DriverConfig {
    /// Create a configuration with `num_workers` workers and one-second units
    #[must_use]
    pub fn new(num_workers: usize) -> Self {
        Self {
            pool: PoolConfig::new(num_workers),
            ..Default::default()
        }
    }

    /// Use `unit` both for producer waits and for the simulated compute time
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_time_unit(mut self, unit: Duration) -> Self {
        self.wait_unit = unit;
        self.pool = self.pool.with_compute_unit(unit);
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.pool.validate()
    }
}

/// Replays scripts against a fresh pool
#[derive(Debug, Clone)]
pub struct Driver {
    config: DriverConfig,
}

impl Driver {
    /// Validate `config` and create a driver.
    ///
    /// A non-positive worker count is rejected here, before any thread exists.
    pub fn new(config: DriverConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration in use
    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// Run `commands` to completion and return the final report.
    pub fn run(&self, commands: &[Command]) -> Result<RunReport> {
        let mut pool = SquarePool::start(self.config.pool.clone())?;

        for command in commands {
            match *command {
                Command::Push(value) => pool.submit(value),
                Command::Wait(units) => {
                    let pause = self
                        .config
                        .wait_unit
                        .saturating_mul(u32::try_from(units).unwrap_or(u32::MAX));
                    log::debug!("producer waiting {:?}", pause);
                    thread::sleep(pause);
                }
            }
        }

        pool.no_more_jobs();
        pool.finish()
    }
}
