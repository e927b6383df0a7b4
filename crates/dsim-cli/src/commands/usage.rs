use anyhow::Result;
use dsim_core::Clock;
use dsim_io::ObjectStore;
use dsim_pipeline::{publish_usage, UsageSummary};
use rand::Rng;
use tracing::info;

use super::print_json;
use crate::config::DsimConfig;

pub fn handle(
    config: &DsimConfig,
    json: bool,
    store: &dyn ObjectStore,
    clock: &dyn Clock,
    rng: &mut impl Rng,
) -> Result<UsageSummary> {
    info!(store = %store.describe(), prefix = %config.usage.input_prefix, "starting usage run");
    let summary = publish_usage(store, &config.storage.bucket, &config.usage, clock, &mut *rng)?;
    if json {
        print_json(&summary)?;
    }
    Ok(summary)
}
