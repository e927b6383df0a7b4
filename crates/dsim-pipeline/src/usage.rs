use dsim_core::{Clock, DistributionRecord, DsimResult};
use dsim_gen::{dedupe_devices, expand_usage, UsageWindow};
use dsim_io::{decode_csv, encode_csv, is_csv_key, run_stamp, usage_key, ObjectStore};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Settings for one usage cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageSettings {
    /// Where previously published distribution tables are read from
    #[serde(default = "default_input_prefix")]
    pub input_prefix: String,
    #[serde(default = "default_output_folder")]
    pub output_folder: String,
    #[serde(default = "default_lookback")]
    pub lookback_seconds: u64,
    #[serde(default = "default_interval")]
    pub interval_seconds: u64,
}

impl Default for UsageSettings {
    fn default() -> Self {
        Self {
            input_prefix: default_input_prefix(),
            output_folder: default_output_folder(),
            lookback_seconds: default_lookback(),
            interval_seconds: default_interval(),
        }
    }
}

fn default_input_prefix() -> String {
    "pilot/".to_string()
}

fn default_output_folder() -> String {
    "usage".to_string()
}

fn default_lookback() -> u64 {
    3600
}

fn default_interval() -> u64 {
    5
}

/// What one usage cycle read and wrote.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UsageSummary {
    pub run_stamp: String,
    pub bucket: String,
    pub source_keys: Vec<String>,
    pub source_rows: usize,
    pub devices: usize,
    pub records: usize,
    pub usage_key: String,
}

/// Read every CSV under `input_prefix` in listing order, concatenated.
pub fn read_distribution_tables(
    store: &dyn ObjectStore,
    bucket: &str,
    prefix: &str,
) -> DsimResult<(Vec<String>, Vec<DistributionRecord>)> {
    let mut keys = Vec::new();
    let mut rows = Vec::new();
    for key in store.list(bucket, prefix)? {
        if !is_csv_key(&key) {
            warn!(key = %key, "skipping non-csv object");
            continue;
        }
        let table: Vec<DistributionRecord> = decode_csv(&store.get(bucket, &key)?)?;
        debug!(key = %key, rows = table.len(), "read distribution table");
        rows.extend(table);
        keys.push(key);
    }
    Ok((keys, rows))
}

/// Read published distributions, collapse repeated devices, expand each into
/// readings over the lookback window and publish the usage table.
///
/// An empty source produces a header-only usage table.
pub fn publish_usage(
    store: &dyn ObjectStore,
    bucket: &str,
    settings: &UsageSettings,
    clock: &dyn Clock,
    rng: &mut impl Rng,
) -> DsimResult<UsageSummary> {
    let window = UsageWindow::new(settings.lookback_seconds, settings.interval_seconds)?;

    let (source_keys, rows) = read_distribution_tables(store, bucket, &settings.input_prefix)?;
    let source_rows = rows.len();
    info!(
        files = source_keys.len(),
        rows = source_rows,
        "read distributions from s3://{bucket}/{}",
        settings.input_prefix
    );
    if rows.is_empty() {
        warn!(prefix = %settings.input_prefix, "no input data found");
    }

    let devices = dedupe_devices(rows);
    info!(devices = devices.len(), "unique devices after deduplication");

    let now = clock.now();
    let usage = expand_usage(&devices, window, now, rng)?;
    info!(records = usage.len(), "generated usage readings");

    let key = usage_key(&settings.output_folder, &run_stamp(now));
    store.put(bucket, &key, &encode_csv(&usage)?)?;
    info!("usage table written to s3://{bucket}/{key}");

    Ok(UsageSummary {
        run_stamp: run_stamp(now),
        bucket: bucket.to_string(),
        source_keys,
        source_rows,
        devices: devices.len(),
        records: usage.len(),
        usage_key: key,
    })
}
