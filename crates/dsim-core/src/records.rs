use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// `date` column format of the usage CSV.
pub const USAGE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One unit handed to one household.
///
/// Field order is the CSV column order:
/// `id,name,region,district,village,phone,serial,country,distribution_date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionRecord {
    pub id: u64,
    pub name: String,
    pub region: String,
    pub district: String,
    pub village: String,
    pub phone: String,
    pub serial: String,
    pub country: String,
    pub distribution_date: NaiveDate,
}

impl DistributionRecord {
    /// `serial + "_" + phone`, verbatim.
    ///
    /// Neither field is escaped, so a `_` inside either one can make two
    /// different devices share an id.
    pub fn device_id(&self) -> String {
        format!("{}_{}", self.serial, self.phone)
    }
}

/// One energy reading for one device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageRecord {
    #[serde(rename = "date", with = "usage_timestamp")]
    pub timestamp: NaiveDateTime,
    pub device_id: String,
    pub energy_kwh: f64,
}

mod usage_timestamp {
    use super::USAGE_TIMESTAMP_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format(USAGE_TIMESTAMP_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, USAGE_TIMESTAMP_FORMAT).map_err(de::Error::custom)
    }
}
