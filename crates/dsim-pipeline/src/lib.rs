//! # dsim-pipeline: generate → serialize → publish
//!
//! - [`publish_distributions`]: one batch of distribution records plus its pilot prefix
//! - [`publish_usage`]: published distributions → deduplicated devices → usage readings
//! - [`PeriodicTask`]: fixed-delay repetition with a [`CancelHandle`] and injectable [`Sleeper`]
//!
//! Each cycle reads the [`dsim_core::Clock`] once and returns a serializable summary.

pub mod distributions;
pub mod schedule;
pub mod usage;

pub use distributions::{pilot_slice, publish_distributions, DistributionSettings, DistributionSummary};
pub use schedule::{CancelHandle, PeriodicTask, Sleeper, ThreadSleeper};
pub use usage::{publish_usage, read_distribution_tables, UsageSettings, UsageSummary};
