//! Blob storage gateway.
//!
//! Every backend speaks the same three calls: `put`, `get` and `list`. Calls
//! block, are never retried, and report failures as
//! [`DsimError::StorageUnavailable`].

use std::path::{Component, Path};

use dsim_core::{DsimError, DsimResult};
use serde::{Deserialize, Serialize};

pub mod fs;
#[cfg(feature = "http")]
pub mod http;
pub mod memory;

pub use fs::FsStore;
#[cfg(feature = "http")]
pub use http::HttpStore;
pub use memory::MemoryStore;

pub trait ObjectStore {
    fn put(&self, bucket: &str, key: &str, body: &[u8]) -> DsimResult<()>;

    fn get(&self, bucket: &str, key: &str) -> DsimResult<Vec<u8>>;

    /// Keys under `prefix`, sorted lexicographically.
    fn list(&self, bucket: &str, prefix: &str) -> DsimResult<Vec<String>>;

    /// Short human-readable location for logs, e.g. `fs:/srv/objects`.
    fn describe(&self) -> String;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Directory tree at `root`, one sub-directory per bucket
    #[default]
    Fs,
    /// S3-compatible endpoint, path-style addressing
    Http,
    /// In-process map; objects vanish when the process exits
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    #[serde(default = "default_bucket")]
    pub bucket: String,
    /// Root directory for the `fs` backend
    #[serde(default = "default_root")]
    pub root: String,
    /// Base URL for the `http` backend, e.g. `http://localhost:9000`
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Sent as `Authorization: Bearer <token>` by the `http` backend
    #[serde(default)]
    pub auth_token: Option<String>,
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            bucket: default_bucket(),
            root: default_root(),
            endpoint: None,
            auth_token: None,
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_bucket() -> String {
    "hedera-hackathon".to_string()
}

fn default_root() -> String {
    "./object-store".to_string()
}

fn default_timeout() -> u64 {
    30
}

/// Build the backend named by `config`.
pub fn open_store(config: &StorageConfig) -> DsimResult<Box<dyn ObjectStore>> {
    match config.backend {
        StorageBackend::Fs => Ok(Box::new(FsStore::new(&config.root))),
        StorageBackend::Memory => Ok(Box::new(MemoryStore::new())),
        #[cfg(feature = "http")]
        StorageBackend::Http => {
            let endpoint = config.endpoint.as_deref().ok_or_else(|| {
                DsimError::Config("storage.endpoint is required for the http backend".into())
            })?;
            Ok(Box::new(HttpStore::new(
                endpoint,
                config.auth_token.clone(),
                std::time::Duration::from_secs(config.timeout_seconds),
            )))
        }
        #[cfg(not(feature = "http"))]
        StorageBackend::Http => Err(DsimError::Config(
            "dsim-io was built without the `http` feature".into(),
        )),
    }
}

/// Reject keys that are empty, absolute, or climb out of the bucket.
pub(crate) fn validate_key(key: &str) -> DsimResult<()> {
    if key.is_empty() || key.starts_with('/') || key.contains('\0') {
        return Err(DsimError::Validation(format!("invalid object key '{key}'")));
    }
    for component in Path::new(key).components() {
        match component {
            Component::Normal(_) => {}
            _ => {
                return Err(DsimError::Validation(format!(
                    "object key '{key}' must be a relative path without '..'"
                )))
            }
        }
    }
    Ok(())
}

pub(crate) fn validate_bucket(bucket: &str) -> DsimResult<()> {
    if bucket.is_empty() || bucket.contains('/') || bucket == "." || bucket == ".." {
        return Err(DsimError::Validation(format!("invalid bucket name '{bucket}'")));
    }
    Ok(())
}
