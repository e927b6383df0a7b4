//! CSV encoding for distribution and usage records.
//!
//! The header row is written explicitly so a zero-row table still carries its
//! column names. Decoding matches columns by header name.

use csv::{ReaderBuilder, WriterBuilder};
use dsim_core::{DistributionRecord, DsimError, DsimResult, UsageRecord};
use serde::{de::DeserializeOwned, Serialize};

pub const DISTRIBUTION_COLUMNS: [&str; 9] = [
    "id",
    "name",
    "region",
    "district",
    "village",
    "phone",
    "serial",
    "country",
    "distribution_date",
];

pub const USAGE_COLUMNS: [&str; 3] = ["date", "device_id", "energy_kwh"];

/// A record type with a fixed CSV header.
pub trait CsvTable: Serialize + DeserializeOwned {
    const COLUMNS: &'static [&'static str];
}

impl CsvTable for DistributionRecord {
    const COLUMNS: &'static [&'static str] = &DISTRIBUTION_COLUMNS;
}

impl CsvTable for UsageRecord {
    const COLUMNS: &'static [&'static str] = &USAGE_COLUMNS;
}

pub fn encode_csv<T: CsvTable>(rows: &[T]) -> DsimResult<Vec<u8>> {
    let mut wtr = WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    wtr.write_record(T::COLUMNS).map_err(encode_error)?;
    for row in rows {
        wtr.serialize(row).map_err(encode_error)?;
    }
    wtr.into_inner()
        .map_err(|err| DsimError::Io(err.into_error()))
}

pub fn decode_csv<T: CsvTable>(bytes: &[u8]) -> DsimResult<Vec<T>> {
    let mut reader = ReaderBuilder::new().from_reader(bytes);
    reader
        .deserialize()
        .collect::<Result<Vec<T>, _>>()
        .map_err(decode_error)
}

fn encode_error(err: csv::Error) -> DsimError {
    classify(err, |msg| DsimError::Other(format!("csv encode: {msg}")))
}

fn decode_error(err: csv::Error) -> DsimError {
    classify(err, |msg| DsimError::Parse(format!("csv: {msg}")))
}

/// I/O failures stay `Io`; everything else is the caller's kind.
fn classify(err: csv::Error, otherwise: impl FnOnce(String) -> DsimError) -> DsimError {
    if !err.is_io_error() {
        return otherwise(err.to_string());
    }
    match err.into_kind() {
        csv::ErrorKind::Io(io) => DsimError::Io(io),
        kind => otherwise(format!("{kind:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample() -> Vec<DistributionRecord> {
        vec![
            DistributionRecord {
                id: 1,
                name: "Grace Mwangi".into(),
                region: "Nairobi".into(),
                district: "Kasarani".into(),
                village: "Garden Estate".into(),
                phone: "+254712345678".into(),
                serial: "SN-00412-QWER".into(),
                country: "Kenya".into(),
                distribution_date: NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
            },
            DistributionRecord {
                id: 2,
                name: "Okafor, Jr. \"Chi\"".into(),
                region: "Centre".into(),
                district: "Yaoundé".into(),
                village: "Biyem-Assi".into(),
                phone: "+23761234567".into(),
                serial: "SN-99999-ZZZZ".into(),
                country: "Cameroon".into(),
                distribution_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            },
        ]
    }

    #[test]
    fn distribution_header_is_the_column_contract() {
        let bytes = encode_csv(&sample()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "id,name,region,district,village,phone,serial,country,distribution_date"
        );
        assert_eq!(
            lines.next().unwrap(),
            "1,Grace Mwangi,Nairobi,Kasarani,Garden Estate,+254712345678,SN-00412-QWER,Kenya,2024-02-29"
        );
    }

    #[test]
    fn distribution_rows_survive_a_round_trip() {
        let rows = sample();
        let decoded: Vec<DistributionRecord> = decode_csv(&encode_csv(&rows).unwrap()).unwrap();
        assert_eq!(decoded, rows);
    }

    #[test]
    fn empty_table_still_has_header() {
        let bytes = encode_csv::<UsageRecord>(&[]).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), "date,device_id,energy_kwh\n");
        let decoded: Vec<UsageRecord> = decode_csv(b"date,device_id,energy_kwh\n").unwrap();
        assert!(decoded.is_empty());
    }

    #[test]
    fn usage_rows_use_space_separated_timestamp() {
        let rows = vec![UsageRecord {
            timestamp: NaiveDate::from_ymd_opt(2025, 10, 1)
                .unwrap()
                .and_hms_opt(11, 0, 5)
                .unwrap(),
            device_id: "SN-00412-QWER_+254712345678".into(),
            energy_kwh: 0.0731,
        }];
        let text = String::from_utf8(encode_csv(&rows).unwrap()).unwrap();
        assert!(text.ends_with("2025-10-01 11:00:05,SN-00412-QWER_+254712345678,0.0731\n"));
    }

    #[test]
    fn columns_are_matched_by_name() {
        let shuffled = "country,id,name,region,district,village,phone,serial,distribution_date\n\
                        Ghana,7,Ama Mensah,Greater Accra,Accra,Osu,+23351234567,SN-00001-AAAA,2024-06-01\n";
        let rows: Vec<DistributionRecord> = decode_csv(shuffled.as_bytes()).unwrap();
        assert_eq!(rows[0].id, 7);
        assert_eq!(rows[0].country, "Ghana");
    }

    #[test]
    fn malformed_rows_are_parse_errors() {
        let bad = "id,name,region,district,village,phone,serial,country,distribution_date\n\
                   x,A,B,C,D,E,F,G,2024-01-01\n";
        let err = decode_csv::<DistributionRecord>(bad.as_bytes()).unwrap_err();
        assert!(matches!(err, DsimError::Parse(_)));
    }

    #[test]
    fn io_failures_are_not_reported_as_parse_errors() {
        let io = || std::io::Error::new(std::io::ErrorKind::BrokenPipe, "sink closed");
        assert!(matches!(encode_error(csv::Error::from(io())), DsimError::Io(_)));
        assert!(matches!(decode_error(csv::Error::from(io())), DsimError::Io(_)));
    }

    #[test]
    fn unencodable_rows_are_not_parse_errors() {
        #[derive(Serialize, serde::Deserialize)]
        struct Nested {
            inner: std::collections::BTreeMap<String, u32>,
        }
        impl CsvTable for Nested {
            const COLUMNS: &'static [&'static str] = &["inner"];
        }
        let row = Nested {
            inner: [("a".to_string(), 1)].into_iter().collect(),
        };
        let err = encode_csv(&[row]).unwrap_err();
        assert!(matches!(err, DsimError::Other(_)));
        assert!(err.to_string().contains("csv encode"));
    }
}
