//! Process setup shared by the `dsim` binary and the zero-argument entry points.

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use rand::{rngs::StdRng, SeedableRng};
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use crate::config::{load_config, ConfigSource, DsimConfig};

/// Install the global subscriber. Logs go to stderr so `--json` output on
/// stdout stays machine-readable.
pub fn init_logging(level: Level) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("setting default subscriber failed")
}

/// Load configuration and start logging.
///
/// Logging is installed before any configuration error is returned, so the
/// failure itself gets logged. `log_level` wins over `logging.level`.
pub fn startup(
    config_flag: Option<&Path>,
    log_level: Option<Level>,
) -> Result<(DsimConfig, ConfigSource)> {
    let loaded = load_config(config_flag);

    let mut level_error = None;
    let level = match (log_level, &loaded) {
        (Some(level), _) => level,
        (None, Ok((config, _))) => match config.logging.level() {
            Ok(level) => level,
            Err(err) => {
                level_error = Some(err);
                Level::INFO
            }
        },
        (None, Err(_)) => Level::INFO,
    };
    init_logging(level)?;
    if let Some(err) = level_error {
        return Err(err);
    }

    let (config, source) = loaded?;
    config.validate()?;
    info!(%source, backend = ?config.storage.backend, bucket = %config.storage.bucket, "configuration loaded");
    Ok((config, source))
}

/// Seeded when a seed is given, otherwise drawn from the OS.
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => {
            info!(seed, "using fixed RNG seed");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    }
}

/// Map a run's outcome to the process exit status, logging the error chain.
pub fn exit_status(result: Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn same_seed_same_stream() {
        let mut a = seeded_rng(Some(5));
        let mut b = seeded_rng(Some(5));
        let left: Vec<u32> = (0..8).map(|_| a.gen()).collect();
        let right: Vec<u32> = (0..8).map(|_| b.gen()).collect();
        assert_eq!(left, right);
    }
}
