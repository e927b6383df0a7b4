use std::time::Duration;

use anyhow::Result;
use dsim_core::Clock;
use dsim_io::ObjectStore;
use dsim_pipeline::{publish_distributions, PeriodicTask, Sleeper};
use rand::Rng;
use tracing::info;

use super::print_json;
use crate::cli::DistributionsArgs;
use crate::config::DsimConfig;

/// Run distribution cycles until `args` says stop (or forever). Returns the
/// number of completed cycles; the first failing cycle ends the run.
pub fn handle(
    config: &DsimConfig,
    args: &DistributionsArgs,
    store: &dyn ObjectStore,
    clock: &dyn Clock,
    sleeper: &dyn Sleeper,
    rng: &mut impl Rng,
) -> Result<u64> {
    let mut settings = config.distributions.clone();
    if let Some(rows) = args.rows {
        settings.rows = rows;
    }
    let bucket = config.storage.bucket.as_str();

    info!(
        store = %store.describe(),
        rows = settings.rows,
        interval_seconds = settings.interval_seconds,
        "starting distribution publisher"
    );
    let task = PeriodicTask::new(Duration::from_secs(settings.interval_seconds))
        .with_max_cycles(args.max_cycles());
    let completed = task.run(sleeper, |cycle| {
        let summary = publish_distributions(store, bucket, &settings, clock, &mut *rng)?;
        info!(
            cycle,
            rows = summary.rows,
            pilot_rows = summary.pilot_rows,
            "distribution cycle {} complete",
            summary.run_stamp
        );
        if args.json {
            print_json(&summary)?;
        }
        Ok(())
    })?;
    Ok(completed)
}
