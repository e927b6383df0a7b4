use std::fs;
use std::path::{Path, PathBuf};

use dsim_core::{DsimError, DsimResult, StorageOp};
use walkdir::WalkDir;

use super::{validate_bucket, validate_key, ObjectStore};

/// Local directory standing in for an object store: `<root>/<bucket>/<key>`.
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn object_path(&self, bucket: &str, key: &str) -> DsimResult<PathBuf> {
        validate_bucket(bucket)?;
        validate_key(key)?;
        Ok(self.root.join(bucket).join(key))
    }
}

impl ObjectStore for FsStore {
    fn put(&self, bucket: &str, key: &str, body: &[u8]) -> DsimResult<()> {
        let path = self.object_path(bucket, key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|err| DsimError::storage(StorageOp::Put, bucket, key, err))?;
        }
        fs::write(&path, body).map_err(|err| DsimError::storage(StorageOp::Put, bucket, key, err))
    }

    fn get(&self, bucket: &str, key: &str) -> DsimResult<Vec<u8>> {
        let path = self.object_path(bucket, key)?;
        fs::read(&path).map_err(|err| DsimError::storage(StorageOp::Get, bucket, key, err))
    }

    fn list(&self, bucket: &str, prefix: &str) -> DsimResult<Vec<String>> {
        validate_bucket(bucket)?;
        let bucket_dir = self.root.join(bucket);
        if !bucket_dir.exists() {
            return Ok(vec![]);
        }

        let mut keys = Vec::new();
        for entry in WalkDir::new(&bucket_dir).follow_links(false) {
            let entry =
                entry.map_err(|err| DsimError::storage(StorageOp::List, bucket, prefix, err))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Ok(relative) = entry.path().strip_prefix(&bucket_dir) else {
                continue;
            };
            let key = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            if key.starts_with(prefix) {
                keys.push(key);
            }
        }
        keys.sort();
        Ok(keys)
    }

    fn describe(&self) -> String {
        format!("fs:{}", self.root.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn objects_land_under_bucket_directory() {
        let dir = tempdir().unwrap();
        let store = FsStore::new(dir.path());
        store.put("bucket", "pilot/data_1.csv", b"id\n").unwrap();
        assert!(dir.path().join("bucket/pilot/data_1.csv").is_file());
        assert_eq!(store.get("bucket", "pilot/data_1.csv").unwrap(), b"id\n");
    }

    #[test]
    fn list_filters_by_prefix_and_sorts() {
        let dir = tempdir().unwrap();
        let store = FsStore::new(dir.path());
        store.put("bucket", "pilot/data_2.csv", b"").unwrap();
        store.put("bucket", "pilot/data_1.csv", b"").unwrap();
        store.put("bucket", "pilot/nested/data_0.csv", b"").unwrap();
        store.put("bucket", "distributions/data_1.csv", b"").unwrap();

        let keys = store.list("bucket", "pilot/").unwrap();
        assert_eq!(
            keys,
            vec!["pilot/data_1.csv", "pilot/data_2.csv", "pilot/nested/data_0.csv"]
        );
        assert_eq!(store.list("bucket", "").unwrap().len(), 4);
    }

    #[test]
    fn missing_bucket_lists_empty() {
        let dir = tempdir().unwrap();
        let store = FsStore::new(dir.path());
        assert!(store.list("bucket", "pilot/").unwrap().is_empty());
    }

    #[test]
    fn missing_object_is_storage_unavailable() {
        let dir = tempdir().unwrap();
        let store = FsStore::new(dir.path());
        let err = store.get("bucket", "pilot/none.csv").unwrap_err();
        assert!(matches!(err, DsimError::StorageUnavailable { .. }));
    }

    #[test]
    fn traversal_keys_are_rejected() {
        let dir = tempdir().unwrap();
        let store = FsStore::new(dir.path());
        assert!(store.put("bucket", "../escape.csv", b"x").is_err());
    }
}
