//! # dsim-core: shared data model for the distribution simulator
//!
//! Holds the pieces every other crate agrees on:
//!
//! - [`taxonomy`]: the fixed Country → Region → District → Village tree
//! - [`template`]: `#`/`?`/`^` placeholder templates and per-country phone patterns
//! - [`records`]: [`DistributionRecord`] and [`UsageRecord`], whose field order is the CSV contract
//! - [`clock`]: injectable "now" so runs are reproducible under test
//! - [`error`]: [`DsimError`] / [`DsimResult`]

pub mod clock;
pub mod error;
pub mod records;
pub mod taxonomy;
pub mod template;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{DsimError, DsimResult, StorageOp};
pub use records::{DistributionRecord, UsageRecord, USAGE_TIMESTAMP_FORMAT};
pub use taxonomy::{GeoTaxonomy, Location, EAST_AND_WEST_AFRICA};
pub use template::{phone_pattern, Template, DEFAULT_SERIAL_TEMPLATE};
