use chrono::NaiveDate;
use dsim_core::{Clock, DsimResult, DEFAULT_SERIAL_TEMPLATE, EAST_AND_WEST_AFRICA};
use dsim_gen::{default_start_date, DistributionGenerator, IdentifierGenerator};
use dsim_io::{distribution_key, encode_csv, pilot_key, run_stamp, ObjectStore};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Settings for one distribution cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistributionSettings {
    /// Records generated per cycle
    #[serde(default = "default_rows")]
    pub rows: usize,
    /// Delay between cycles of the looping generator
    #[serde(default = "default_interval")]
    pub interval_seconds: u64,
    #[serde(default = "default_folder")]
    pub folder: String,
    #[serde(default = "default_pilot_folder")]
    pub pilot_folder: String,
    /// Leading share of each run copied to the pilot folder, rounded down
    #[serde(default = "default_pilot_percent")]
    pub pilot_percent: u8,
    #[serde(default = "default_start_date")]
    pub start_date: NaiveDate,
    #[serde(default = "default_serial_template")]
    pub serial_template: String,
}

impl Default for DistributionSettings {
    fn default() -> Self {
        Self {
            rows: default_rows(),
            interval_seconds: default_interval(),
            folder: default_folder(),
            pilot_folder: default_pilot_folder(),
            pilot_percent: default_pilot_percent(),
            start_date: default_start_date(),
            serial_template: default_serial_template(),
        }
    }
}

fn default_rows() -> usize {
    100
}

fn default_interval() -> u64 {
    15 * 60
}

fn default_folder() -> String {
    "distributions".to_string()
}

fn default_pilot_folder() -> String {
    "pilot".to_string()
}

fn default_pilot_percent() -> u8 {
    10
}

fn default_serial_template() -> String {
    DEFAULT_SERIAL_TEMPLATE.to_string()
}

/// What one distribution cycle wrote.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DistributionSummary {
    pub run_stamp: String,
    pub bucket: String,
    pub distribution_key: String,
    pub pilot_key: String,
    pub rows: usize,
    pub pilot_rows: usize,
}

/// The first `percent`% of `rows`, rounded down, in original order.
pub fn pilot_slice<T>(rows: &[T], percent: u8) -> &[T] {
    let percent = usize::from(percent.min(100));
    &rows[..rows.len() * percent / 100]
}

/// Generate one batch, then publish the full table and its pilot prefix.
///
/// The clock is read once: the same instant names both objects and bounds
/// every `distribution_date`.
pub fn publish_distributions(
    store: &dyn ObjectStore,
    bucket: &str,
    settings: &DistributionSettings,
    clock: &dyn Clock,
    rng: &mut impl Rng,
) -> DsimResult<DistributionSummary> {
    let now = clock.now();
    let stamp = run_stamp(now);

    let generator = DistributionGenerator::new(
        &EAST_AND_WEST_AFRICA,
        IdentifierGenerator::new(&settings.serial_template),
        settings.start_date,
    )?;
    let records = generator.generate(settings.rows, now.date(), rng)?;
    for record in records.iter().take(5) {
        debug!(?record, "generated");
    }

    let key = distribution_key(&settings.folder, &stamp);
    store.put(bucket, &key, &encode_csv(&records)?)?;
    info!(
        rows = records.len(),
        "distribution table written to s3://{bucket}/{key}"
    );

    let pilot = pilot_slice(&records, settings.pilot_percent);
    let pilot_key = pilot_key(&settings.pilot_folder, &stamp);
    store.put(bucket, &pilot_key, &encode_csv(pilot)?)?;
    info!(
        rows = pilot.len(),
        "pilot table written to s3://{bucket}/{pilot_key}"
    );

    Ok(DistributionSummary {
        run_stamp: stamp,
        bucket: bucket.to_string(),
        distribution_key: key,
        pilot_key,
        rows: records.len(),
        pilot_rows: pilot.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use dsim_core::{DistributionRecord, DsimError, FixedClock, StorageOp};
    use dsim_io::{decode_csv, MemoryStore};
    use rand::{rngs::StdRng, SeedableRng};

    fn clock() -> FixedClock {
        FixedClock(
            NaiveDate::from_ymd_opt(2025, 10, 1)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
        )
    }

    #[test]
    fn pilot_is_a_floor_prefix() {
        let rows: Vec<u32> = (0..100).collect();
        assert_eq!(pilot_slice(&rows, 10), &rows[..10]);
        assert_eq!(pilot_slice(&rows[..19], 10).len(), 1);
        assert_eq!(pilot_slice(&rows[..9], 10).len(), 0);
        assert_eq!(pilot_slice(&rows, 0).len(), 0);
        assert_eq!(pilot_slice(&rows, 250).len(), 100);
    }

    #[test]
    fn publishes_full_and_pilot_tables() {
        let store = MemoryStore::new();
        let mut rng = StdRng::seed_from_u64(21);
        let summary = publish_distributions(
            &store,
            "bucket",
            &DistributionSettings::default(),
            &clock(),
            &mut rng,
        )
        .unwrap();

        assert_eq!(summary.run_stamp, "2025-10-01_12-00-00");
        assert_eq!(
            summary.distribution_key,
            "distributions/data_2025-10-01_12-00-00.csv"
        );
        assert_eq!(summary.pilot_key, "pilot/data_2025-10-01_12-00-00.csv");
        assert_eq!((summary.rows, summary.pilot_rows), (100, 10));

        let full: Vec<DistributionRecord> =
            decode_csv(&store.get("bucket", &summary.distribution_key).unwrap()).unwrap();
        let pilot: Vec<DistributionRecord> =
            decode_csv(&store.get("bucket", &summary.pilot_key).unwrap()).unwrap();
        assert_eq!(full.len(), 100);
        assert_eq!(pilot, full[..10].to_vec());
        assert!(full
            .iter()
            .all(|r| r.distribution_date <= clock().now().date()));
    }

    #[test]
    fn zero_rows_still_publishes_headers() {
        let store = MemoryStore::new();
        let settings = DistributionSettings {
            rows: 0,
            ..DistributionSettings::default()
        };
        let mut rng = StdRng::seed_from_u64(22);
        let summary =
            publish_distributions(&store, "bucket", &settings, &clock(), &mut rng).unwrap();
        let body = store.get("bucket", &summary.pilot_key).unwrap();
        assert!(String::from_utf8(body).unwrap().starts_with("id,name,"));
    }

    struct FailingStore;

    impl ObjectStore for FailingStore {
        fn put(&self, bucket: &str, key: &str, _body: &[u8]) -> DsimResult<()> {
            Err(DsimError::storage(StorageOp::Put, bucket, key, "offline"))
        }
        fn get(&self, bucket: &str, key: &str) -> DsimResult<Vec<u8>> {
            Err(DsimError::storage(StorageOp::Get, bucket, key, "offline"))
        }
        fn list(&self, bucket: &str, prefix: &str) -> DsimResult<Vec<String>> {
            Err(DsimError::storage(StorageOp::List, bucket, prefix, "offline"))
        }
        fn describe(&self) -> String {
            "offline".into()
        }
    }

    #[test]
    fn storage_failure_aborts_the_cycle() {
        let mut rng = StdRng::seed_from_u64(23);
        let err = publish_distributions(
            &FailingStore,
            "bucket",
            &DistributionSettings::default(),
            &clock(),
            &mut rng,
        )
        .unwrap_err();
        assert!(matches!(err, DsimError::StorageUnavailable { .. }));
    }
}
