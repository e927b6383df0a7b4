//! Unified error types for the dsim workspace
//!
//! [`DsimError`] is the common error returned by the library crates. Binaries
//! wrap it in `anyhow::Error` at the command boundary.
//!
//! # Example
//!
//! ```ignore
//! use dsim_core::{DsimError, DsimResult};
//!
//! fn publish(store: &dyn ObjectStore) -> DsimResult<()> {
//!     let records = generate_distributions(&mut rng, 100, today)?;
//!     store.put("bucket", "distributions/data.csv", &encode(&records)?)?;
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// Storage operation that failed, carried by [`DsimError::StorageUnavailable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageOp {
    Put,
    Get,
    List,
}

impl StorageOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageOp::Put => "put",
            StorageOp::Get => "get",
            StorageOp::List => "list",
        }
    }
}

impl std::fmt::Display for StorageOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unified error type for all dsim operations.
#[derive(Error, Debug)]
pub enum DsimError {
    /// Identifier lookup for a country with no phone pattern
    #[error("unknown country '{0}': no phone pattern registered")]
    UnknownCountry(String),

    /// Read, write or list failure against the object store
    #[error("storage unavailable: {op} s3://{bucket}/{key}: {reason}")]
    StorageUnavailable {
        op: StorageOp,
        bucket: String,
        key: String,
        reason: String,
    },

    /// Local I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV/XML/date decoding errors
    #[error("Parse error: {0}")]
    Parse(String),

    /// Generator parameter errors (bad interval, inverted date range, ...)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic errors (for wrapping external errors)
    #[error("{0}")]
    Other(String),
}

impl DsimError {
    pub fn storage(
        op: StorageOp,
        bucket: impl Into<String>,
        key: impl Into<String>,
        reason: impl std::fmt::Display,
    ) -> Self {
        DsimError::StorageUnavailable {
            op,
            bucket: bucket.into(),
            key: key.into(),
            reason: reason.to_string(),
        }
    }
}

/// Convenience type alias for Results using DsimError.
pub type DsimResult<T> = Result<T, DsimError>;

impl From<anyhow::Error> for DsimError {
    fn from(err: anyhow::Error) -> Self {
        DsimError::Other(format!("{err:#}"))
    }
}

impl From<String> for DsimError {
    fn from(s: String) -> Self {
        DsimError::Other(s)
    }
}

impl From<&str> for DsimError {
    fn from(s: &str) -> Self {
        DsimError::Other(s.to_string())
    }
}

impl From<chrono::ParseError> for DsimError {
    fn from(err: chrono::ParseError) -> Self {
        DsimError::Parse(err.to_string())
    }
}
