use std::collections::HashSet;

use chrono::{Duration, NaiveDateTime};
use dsim_core::{DistributionRecord, DsimError, DsimResult, UsageRecord};
use rand::Rng;
use tracing::debug;

/// Lower bound of one reading, kWh.
pub const ENERGY_KWH_MIN: f64 = 0.01;
/// Upper bound of one reading, kWh.
pub const ENERGY_KWH_MAX: f64 = 0.1;
/// Longest accepted lookback: one leap year.
pub const MAX_LOOKBACK_SECONDS: u64 = 366 * 24 * 60 * 60;

const MAX_PREALLOCATED_READINGS: usize = 1 << 20;

/// Lookback window and sampling interval, both in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsageWindow {
    pub lookback_seconds: u64,
    pub interval_seconds: u64,
}

impl UsageWindow {
    pub fn new(lookback_seconds: u64, interval_seconds: u64) -> DsimResult<Self> {
        let window = Self {
            lookback_seconds,
            interval_seconds,
        };
        window.check()?;
        Ok(window)
    }

    fn check(&self) -> DsimResult<()> {
        if self.interval_seconds == 0 {
            return Err(DsimError::Validation(
                "usage interval must be at least one second".into(),
            ));
        }
        if self.lookback_seconds > MAX_LOOKBACK_SECONDS {
            return Err(DsimError::Validation(format!(
                "usage lookback of {} seconds exceeds the {MAX_LOOKBACK_SECONDS} second limit",
                self.lookback_seconds
            )));
        }
        Ok(())
    }

    /// `floor(lookback / interval)`
    pub fn steps(&self) -> u64 {
        self.lookback_seconds / self.interval_seconds
    }
}

impl Default for UsageWindow {
    /// One hour of readings every five seconds.
    fn default() -> Self {
        Self {
            lookback_seconds: 3600,
            interval_seconds: 5,
        }
    }
}

/// Drop later records that repeat an earlier `(phone, serial)` pair.
pub fn dedupe_devices(records: Vec<DistributionRecord>) -> Vec<DistributionRecord> {
    let mut seen: HashSet<(String, String)> = HashSet::with_capacity(records.len());
    records
        .into_iter()
        .filter(|record| seen.insert((record.phone.clone(), record.serial.clone())))
        .collect()
}

/// One reading per device per step over `window`, ending just before `now`.
///
/// Output is grouped by device in input order, steps ascending. Readings are
/// independent uniform draws in `[ENERGY_KWH_MIN, ENERGY_KWH_MAX]` rounded to
/// four decimals.
pub fn expand_usage(
    devices: &[DistributionRecord],
    window: UsageWindow,
    now: NaiveDateTime,
    rng: &mut impl Rng,
) -> DsimResult<Vec<UsageRecord>> {
    window.check()?;
    let steps = window.steps();
    let lookback = seconds(window.lookback_seconds)?;
    let interval = seconds(window.interval_seconds)?;
    let start = now.checked_sub_signed(lookback).ok_or_else(|| {
        DsimError::Validation(format!(
            "usage lookback of {} seconds reaches before the earliest representable time",
            window.lookback_seconds
        ))
    })?;

    let expected = usize::try_from(steps)
        .unwrap_or(usize::MAX)
        .saturating_mul(devices.len());
    let mut records = Vec::with_capacity(expected.min(MAX_PREALLOCATED_READINGS));
    for device in devices {
        let device_id = device.device_id();
        let mut timestamp = start;
        for _ in 0..steps {
            records.push(UsageRecord {
                timestamp,
                device_id: device_id.clone(),
                energy_kwh: reading(rng),
            });
            timestamp += interval;
        }
    }
    debug!(
        devices = devices.len(),
        steps,
        records = records.len(),
        "expanded usage"
    );
    Ok(records)
}

fn reading(rng: &mut impl Rng) -> f64 {
    let raw = rng.gen_range(ENERGY_KWH_MIN..=ENERGY_KWH_MAX);
    (raw * 10_000.0).round() / 10_000.0
}

fn seconds(value: u64) -> DsimResult<Duration> {
    i64::try_from(value)
        .ok()
        .and_then(Duration::try_seconds)
        .ok_or_else(|| DsimError::Validation(format!("{value} seconds is out of range")))
}
