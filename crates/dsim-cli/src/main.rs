use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use dsim_cli::{
    commands::{completions, distributions, usage},
    runtime, Cli, Commands,
};
use dsim_core::SystemClock;
use dsim_io::open_store;
use dsim_pipeline::ThreadSleeper;
use tracing::info;

fn main() -> ExitCode {
    let cli = Cli::parse();
    runtime::exit_status(run(cli))
}

fn run(cli: Cli) -> Result<()> {
    if let Commands::Completions { shell, out } = &cli.command {
        return completions::handle(*shell, out.as_deref());
    }

    let (config, _) = runtime::startup(cli.config.as_deref(), cli.log_level)?;
    let mut rng = runtime::seeded_rng(cli.seed.or(config.seed));
    let store = open_store(&config.storage)?;

    match &cli.command {
        Commands::Distributions(args) => {
            let cycles = distributions::handle(
                &config,
                args,
                store.as_ref(),
                &SystemClock,
                &ThreadSleeper::default(),
                &mut rng,
            )?;
            info!(cycles, "distribution publisher finished");
        }
        Commands::Usage { json } => {
            let summary = usage::handle(&config, *json, store.as_ref(), &SystemClock, &mut rng)?;
            info!(
                devices = summary.devices,
                records = summary.records,
                "usage run complete"
            );
        }
        Commands::Completions { .. } => {}
    }
    Ok(())
}
