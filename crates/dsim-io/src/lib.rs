//! # dsim-io: CSV boundary and object storage
//!
//! - [`codec`]: header-first CSV encoding of distribution and usage records
//! - [`keys`]: `folder/data_<YYYY-MM-DD_HH-MM-SS>.csv` object naming
//! - [`storage`]: the [`ObjectStore`] gateway with `fs`, `http` and `memory` backends
//!
//! ```rust,no_run
//! use dsim_io::{open_store, StorageConfig};
//!
//! fn main() -> dsim_core::DsimResult<()> {
//!     let config = StorageConfig::default();
//!     let store = open_store(&config)?;
//!     for key in store.list(&config.bucket, "pilot/")? {
//!         println!("{key}");
//!     }
//!     Ok(())
//! }
//! ```

pub mod codec;
pub mod keys;
pub mod storage;

pub use codec::{decode_csv, encode_csv, CsvTable, DISTRIBUTION_COLUMNS, USAGE_COLUMNS};
pub use keys::{distribution_key, is_csv_key, pilot_key, run_stamp, usage_key};
pub use storage::{open_store, FsStore, MemoryStore, ObjectStore, StorageBackend, StorageConfig};
#[cfg(feature = "http")]
pub use storage::HttpStore;
