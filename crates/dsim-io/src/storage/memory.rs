use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use dsim_core::{DsimError, DsimResult, StorageOp};

use super::{validate_bucket, validate_key, ObjectStore};

type Objects = BTreeMap<(String, String), Vec<u8>>;

/// In-process object store keyed by `(bucket, key)`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    objects: Mutex<Objects>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Object count across all buckets. A poisoned map is still counted; the
    /// trait calls report the poisoning.
    pub fn len(&self) -> usize {
        self.objects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self, op: StorageOp, bucket: &str, key: &str) -> DsimResult<MutexGuard<'_, Objects>> {
        self.objects
            .lock()
            .map_err(|_| DsimError::storage(op, bucket, key, "memory store lock poisoned"))
    }
}

impl ObjectStore for MemoryStore {
    fn put(&self, bucket: &str, key: &str, body: &[u8]) -> DsimResult<()> {
        validate_bucket(bucket)?;
        validate_key(key)?;
        self.lock(StorageOp::Put, bucket, key)?
            .insert((bucket.to_string(), key.to_string()), body.to_vec());
        Ok(())
    }

    fn get(&self, bucket: &str, key: &str) -> DsimResult<Vec<u8>> {
        self.lock(StorageOp::Get, bucket, key)?
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
            .ok_or_else(|| DsimError::storage(StorageOp::Get, bucket, key, "no such key"))
    }

    fn list(&self, bucket: &str, prefix: &str) -> DsimResult<Vec<String>> {
        let objects = self.lock(StorageOp::List, bucket, prefix)?;
        Ok(objects
            .keys()
            .filter(|(b, k)| b == bucket && k.starts_with(prefix))
            .map(|(_, k)| k.clone())
            .collect())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
