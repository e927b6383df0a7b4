//! # dsim-cli: command-line entry points
//!
//! `dsim` bundles every operation as a subcommand. `dsim-distributions` and
//! `dsim-usage` are zero-argument entry points driven only by configuration.

pub mod cli;
pub mod commands;
pub mod config;
pub mod runtime;

pub use cli::{build_cli_command, Cli, Commands, DistributionsArgs};
pub use config::{load_config, ConfigSource, DsimConfig, LoggingConfig};
