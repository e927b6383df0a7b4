//! One usage run per invocation. Takes no arguments; see `dsim.toml` /
//! `$DSIM_CONFIG`.

use std::process::ExitCode;

use anyhow::Result;
use dsim_cli::{commands::usage, runtime};
use dsim_core::SystemClock;
use dsim_io::open_store;

fn main() -> ExitCode {
    runtime::exit_status(run())
}

fn run() -> Result<()> {
    let (config, _) = runtime::startup(None, None)?;
    let mut rng = runtime::seeded_rng(config.seed);
    let store = open_store(&config.storage)?;
    usage::handle(&config, false, store.as_ref(), &SystemClock, &mut rng)?;
    Ok(())
}
