use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use log::{debug, info, warn};
use parking_lot::Mutex;
use tempfile::NamedTempFile;

use crate::libs::error::{AnyResult, PetflixError};
use crate::libs::utils::ensure_parent_dir;

/**
 * Durable string key-value storage, the local equivalent of a browser's
 * `localStorage`. Constructed once per application and injected where needed.
 */
pub trait KeyValueStorage: Send + Sync {
    fn get(&self, key: &str) -> AnyResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> AnyResult<()>;
}

/// Storage living in memory only, lost when dropped
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> AnyResult<Option<String>> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> AnyResult<()> {
        self.entries.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/**
 * Storage persisted as a single JSON object of string entries. The whole file
 * is read on every access and replaced on every `set`, through a temporary
 * file renamed over it. A file that cannot be decoded is overwritten by the
 * next `set`.
 */
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    // Serializes read-modify-write cycles within the process
    lock: Mutex<()>,
}

impl FileStorage {
    pub fn new(path: PathBuf) -> Self {
        info!("Using storage file: {:?}", path);
        FileStorage {
            path,
            lock: Mutex::new(()),
        }
    }

    fn read_entries(&self) -> AnyResult<BTreeMap<String, String>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => serde_json::from_str(&content).map_err(|err| {
                PetflixError::Storage(format!("corrupted storage file {:?}: {}", self.path, err))
            }),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(PetflixError::Storage(err.to_string())),
        }
    }

    fn replace_file(&self, content: &[u8]) -> io::Result<()> {
        ensure_parent_dir(&self.path)?;
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let mut file = NamedTempFile::new_in(dir)?;
        file.write_all(content)?;
        file.as_file().sync_all()?;
        file.persist(&self.path).map_err(|err| err.error)?;
        Ok(())
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> AnyResult<Option<String>> {
        let _guard = self.lock.lock();
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> AnyResult<()> {
        let _guard = self.lock.lock();
        let mut entries = match self.read_entries() {
            Ok(entries) => entries,
            Err(PetflixError::Storage(reason)) => {
                warn!("Discarding unreadable storage: {}", reason);
                BTreeMap::new()
            }
            Err(err) => return Err(err),
        };
        entries.insert(key.to_string(), value.to_string());

        let json = serde_json::to_string_pretty(&entries)?;
        self.replace_file(json.as_bytes())
            .map_err(|err| PetflixError::Storage(format!("could not write {:?}: {}", self.path, err)))?;

        debug!("Stored {:?} ({} bytes)", key, value.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn memory_storage_get_and_set() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get("key").unwrap(), None);

        storage.set("key", "value").unwrap();
        storage.set("key", "other").unwrap();
        assert_eq!(storage.get("key").unwrap(), Some("other".to_string()));
    }

    #[test]
    fn file_storage_missing_file_reads_empty() {
        let dir = tempdir().expect("failed to create temp dir");
        let storage = FileStorage::new(dir.path().join("storage.json"));
        assert_eq!(storage.get("key").unwrap(), None);
    }

    #[test]
    fn file_storage_persists_across_instances() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join("nested").join("storage.json");

        FileStorage::new(path.clone()).set("a", "1").unwrap();
        FileStorage::new(path.clone()).set("b", "2").unwrap();

        let storage = FileStorage::new(path);
        assert_eq!(storage.get("a").unwrap(), Some("1".to_string()));
        assert_eq!(storage.get("b").unwrap(), Some("2".to_string()));
    }

    #[test]
    fn file_storage_reports_corruption_on_read() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join("storage.json");
        fs::write(&path, "not json").unwrap();

        let storage = FileStorage::new(path);
        assert!(matches!(storage.get("a"), Err(PetflixError::Storage(_))));
    }

    #[test]
    fn file_storage_set_replaces_corrupted_file() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join("storage.json");
        fs::write(&path, r#"{"a": ["not", "a", "string"]}"#).unwrap();

        let storage = FileStorage::new(path.clone());
        storage.set("b", "2").expect("set should overwrite the corrupted file");

        assert_eq!(storage.get("b").unwrap(), Some("2".to_string()));
        assert_eq!(storage.get("a").unwrap(), None);
        let content = fs::read_to_string(&path).unwrap();
        assert!(serde_json::from_str::<BTreeMap<String, String>>(&content).is_ok());
    }

    #[test]
    fn file_storage_leaves_no_temporary_files() {
        let dir = tempdir().expect("failed to create temp dir");
        let storage = FileStorage::new(dir.path().join("storage.json"));
        storage.set("a", "1").unwrap();
        storage.set("a", "2").unwrap();

        let files: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(files.len(), 1);
    }
}
