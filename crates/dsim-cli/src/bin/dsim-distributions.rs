//! Publish a distribution batch every `distributions.interval_seconds`,
//! forever. Takes no arguments; see `dsim.toml` / `$DSIM_CONFIG`.

use std::process::ExitCode;

use anyhow::Result;
use dsim_cli::{commands::distributions, runtime, DistributionsArgs};
use dsim_core::SystemClock;
use dsim_io::open_store;
use dsim_pipeline::ThreadSleeper;

fn main() -> ExitCode {
    runtime::exit_status(run())
}

fn run() -> Result<()> {
    let (config, _) = runtime::startup(None, None)?;
    let mut rng = runtime::seeded_rng(config.seed);
    let store = open_store(&config.storage)?;
    distributions::handle(
        &config,
        &DistributionsArgs::default(),
        store.as_ref(),
        &SystemClock,
        &ThreadSleeper::default(),
        &mut rng,
    )?;
    Ok(())
}
