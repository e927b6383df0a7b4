use clap::{Args, CommandFactory, Parser, Subcommand, ValueHint};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "dsim",
    author,
    version,
    about = "Publish synthetic device distributions and energy usage to object storage",
    long_about = None
)]
pub struct Cli {
    /// Path to a dsim.toml file (falls back to $DSIM_CONFIG, then ./dsim.toml)
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Set the logging level (overrides logging.level from the config)
    #[arg(long, global = true)]
    pub log_level: Option<tracing::Level>,

    /// Seed the random generator for a reproducible run
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate and publish distribution tables on a fixed interval
    Distributions(DistributionsArgs),
    /// Expand published pilot distributions into usage readings
    Usage {
        /// Print the publish summary as JSON on stdout
        #[arg(long)]
        json: bool,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell type
        #[arg(value_enum)]
        shell: Shell,
        /// Write output to a file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct DistributionsArgs {
    /// Publish a single batch and exit
    #[arg(long)]
    pub once: bool,
    /// Stop after this many cycles instead of looping forever
    #[arg(long, conflicts_with = "once")]
    pub cycles: Option<u64>,
    /// Records per batch (overrides distributions.rows)
    #[arg(long)]
    pub rows: Option<usize>,
    /// Print each cycle's publish summary as a JSON line on stdout
    #[arg(long)]
    pub json: bool,
}

impl DistributionsArgs {
    /// `None` loops until the process is stopped.
    pub fn max_cycles(&self) -> Option<u64> {
        if self.once {
            Some(1)
        } else {
            self.cycles
        }
    }
}

pub fn build_cli_command() -> clap::Command {
    Cli::command()
}
