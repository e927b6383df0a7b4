//! # dsim-gen: synthetic record generation
//!
//! - [`LocationSampler`]: uniform top-down draw over the geo taxonomy
//! - [`IdentifierGenerator`]: phone numbers per country, serials from a template
//! - [`DistributionGenerator`]: full distribution records, ids `1..=N`
//! - [`expand_usage`]: per-device energy readings over a lookback window
//!
//! Every generator takes `&mut impl Rng`; seed a `StdRng` for reproducible runs.

pub mod distribution;
pub mod identifiers;
pub mod location;
pub mod names;
pub mod usage;

pub use distribution::{default_start_date, DistributionGenerator};
pub use identifiers::IdentifierGenerator;
pub use location::LocationSampler;
pub use names::person_name;
pub use usage::{
    dedupe_devices, expand_usage, UsageWindow, ENERGY_KWH_MAX, ENERGY_KWH_MIN, MAX_LOOKBACK_SECONDS,
};
