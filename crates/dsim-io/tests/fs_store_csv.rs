use chrono::NaiveDate;
use dsim_core::DistributionRecord;
use dsim_io::{decode_csv, encode_csv, is_csv_key, open_store, StorageBackend, StorageConfig};
use tempfile::tempdir;

fn record(id: u64, village: &str) -> DistributionRecord {
    DistributionRecord {
        id,
        name: format!("Recipient {id}"),
        region: "South West".into(),
        district: "Lagos".into(),
        village: village.into(),
        phone: format!("+234800000{id:02}"),
        serial: format!("SN-{id:05}-ABCD"),
        country: "Nigeria".into(),
        distribution_date: NaiveDate::from_ymd_opt(2024, 7, 15).unwrap(),
    }
}

#[test]
fn published_csv_reads_back_identically() {
    let dir = tempdir().unwrap();
    let config = StorageConfig {
        backend: StorageBackend::Fs,
        root: dir.path().to_string_lossy().into_owned(),
        ..StorageConfig::default()
    };
    let store = open_store(&config).unwrap();

    let rows = vec![record(1, "Ikeja"), record(2, "Yaba"), record(3, "Surulere")];
    let body = encode_csv(&rows).unwrap();
    store
        .put(&config.bucket, "pilot/data_2025-10-01_12-00-00.csv", &body)
        .unwrap();
    store
        .put(&config.bucket, "pilot/readme.txt", b"not a table")
        .unwrap();

    let keys: Vec<String> = store
        .list(&config.bucket, "pilot/")
        .unwrap()
        .into_iter()
        .filter(|k| is_csv_key(k))
        .collect();
    assert_eq!(keys, vec!["pilot/data_2025-10-01_12-00-00.csv"]);

    let bytes = store.get(&config.bucket, &keys[0]).unwrap();
    let decoded: Vec<DistributionRecord> = decode_csv(&bytes).unwrap();
    assert_eq!(decoded, rows);
}
