//! Object key layout.
//!
//! ```text
//! distributions/data_2025-10-01_12-00-00.csv
//! pilot/data_2025-10-01_12-00-00.csv
//! usage/electricity_usage_2025-10-01_12-00-00.csv
//! ```

use chrono::NaiveDateTime;

/// Timestamp embedded in every object key.
pub const KEY_TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// `YYYY-MM-DD_HH-MM-SS` for one generation run.
pub fn run_stamp(at: NaiveDateTime) -> String {
    at.format(KEY_TIMESTAMP_FORMAT).to_string()
}

pub fn distribution_key(folder: &str, stamp: &str) -> String {
    join(folder, &format!("data_{stamp}.csv"))
}

pub fn pilot_key(folder: &str, stamp: &str) -> String {
    join(folder, &format!("data_{stamp}.csv"))
}

pub fn usage_key(folder: &str, stamp: &str) -> String {
    join(folder, &format!("electricity_usage_{stamp}.csv"))
}

pub fn is_csv_key(key: &str) -> bool {
    key.ends_with(".csv")
}

fn join(folder: &str, file: &str) -> String {
    let folder = folder.trim_matches('/');
    if folder.is_empty() {
        file.to_string()
    } else {
        format!("{folder}/{file}")
    }
}
