//! Replay a job script through the worker pool and print the totals.
//!
//! ```text
//! par_sumsq jobs.txt 4
//! ```
//!
//! Prints `sum odd_count min max` on stdout. Logs go to stderr and are
//! controlled with `RUST_LOG`.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use sumsq_pool::driver::load_script;
use sumsq_pool::{Driver, DriverConfig, Result, SumsqError};

#[derive(Parser, Debug)]
#[command(name = "par_sumsq")]
#[command(version)]
#[command(about = "Square a stream of numbers on a fixed pool of workers")]
struct Args {
    /// Job script: one `p <n>` (push) or `w <n>` (wait) per line
    script: PathBuf,

    /// Number of worker threads (must be positive)
    #[arg(allow_negative_numbers = true)]
    workers: i64,

    /// Length of one time unit in milliseconds, used for waits and compute delays
    #[arg(long, default_value = "1000")]
    time_unit_ms: u64,

    /// Print the full run report as JSON instead of the result line
    #[arg(long)]
    json: bool,
}

fn run(args: &Args) -> Result<String> {
    let workers = usize::try_from(args.workers)
        .ok()
        .filter(|&n| n > 0)
        .ok_or_else(|| {
            SumsqError::invalid_config(
                "workers",
                format!("non-positive worker count {}", args.workers),
            )
        })?;

    let config =
        DriverConfig::new(workers).with_time_unit(Duration::from_millis(args.time_unit_ms));
    let driver = Driver::new(config)?;
    let commands = load_script(&args.script)?;
    log::info!(
        "loaded {} commands from {}",
        commands.len(),
        args.script.display()
    );

    let report = driver.run(&commands)?;
    if args.json {
        Ok(serde_json::to_string_pretty(&report)?)
    } else {
        Ok(report.snapshot.to_string())
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    match run(&args) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
