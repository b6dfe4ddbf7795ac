//! Directory-backed JSON document store with ACID guarantees.
//!
//! Each key maps to `<dir>/<key>.json`. Documents are handed out as
//! `serde_json::Value` so callers (and migrations) work on the raw shape.

use serde_json::Value;
use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};

const EXTENSION: &str = "json";

/// Errors that can occur during document store operations.
#[derive(Debug)]
pub enum StorageError {
    /// File I/O error.
    IoError(std::io::Error),
    /// JSON parse or serialization error.
    JsonError(serde_json::Error),
    /// File locking error.
    LockError(String),
    /// Key that cannot be mapped to a file name.
    InvalidKey(String),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::IoError(e) => write!(f, "I/O error: {}", e),
            StorageError::JsonError(e) => write!(f, "JSON error: {}", e),
            StorageError::LockError(e) => write!(f, "Lock error: {}", e),
            StorageError::InvalidKey(key) => write!(f, "Invalid storage key: '{}'", key),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        StorageError::IoError(e)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        StorageError::JsonError(e)
    }
}

impl From<StorageError> for kdm_core::CampaignError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::IoError(e) => e.into(),
            StorageError::JsonError(e) => e.into(),
            other => kdm_core::CampaignError::storage(other.to_string()),
        }
    }
}

/// A key-value store of JSON documents, one file per key.
///
/// Responsibilities:
/// - **File locking** (exclusive lock per key for writes)
/// - **Atomic writes** (tmp file + fsync + rename)
/// - **Key → file mapping**
///
/// Does NOT:
/// - Know about campaign structure
/// - Run migrations (delegated to `CampaignRepository`)
#[derive(Debug, Clone)]
pub struct DocumentStore {
    dir: PathBuf,
}

impl DocumentStore {
    /// Creates a store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the file backing `key`.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{}.{}", key, EXTENSION)))
    }

    /// Loads the document stored under `key`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Value))`: Document found and parsed
    /// - `Ok(None)`: No document, or an empty file
    /// - `Err`: Failed to read or parse the file
    pub fn load(&self, key: &str) -> Result<Option<Value>, StorageError> {
        let path = self.path_for(key)?;
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }

        Ok(Some(serde_json::from_str(&content)?))
    }

    /// Saves `data` under `key` atomically.
    pub fn save(&self, key: &str, data: &Value) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let _lock = FileLock::acquire(&path)?;
        write_atomic(&path, data)
    }

    /// Performs a transactional read-modify-write under the key's lock.
    ///
    /// `default_value` is used when nothing is stored yet. The closure's
    /// changes are written only if it returns `Ok(())`.
    pub fn update<F>(&self, key: &str, default_value: Value, f: F) -> Result<(), StorageError>
    where
        F: FnOnce(&mut Value) -> Result<(), StorageError>,
    {
        let path = self.path_for(key)?;
        let _lock = FileLock::acquire(&path)?;

        let mut data = self.load(key)?.unwrap_or(default_value);
        f(&mut data)?;
        write_atomic(&path, &data)
    }

    /// Modifies an existing document under the key's lock.
    ///
    /// `f` returns its result and whether it changed the document; an
    /// unchanged document is not rewritten.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(T))`: The closure ran on the stored document
    /// - `Ok(None)`: Nothing stored under `key`
    /// - `Err`: Failed to lock, read or write
    pub fn modify<F, T>(&self, key: &str, f: F) -> Result<Option<T>, StorageError>
    where
        F: FnOnce(&mut Value) -> (T, bool),
    {
        let path = self.path_for(key)?;
        let _lock = FileLock::acquire(&path)?;

        let Some(mut data) = self.load(key)? else {
            return Ok(None);
        };
        let (result, changed) = f(&mut data);
        if changed {
            write_atomic(&path, &data)?;
        }
        Ok(Some(result))
    }

    /// Removes the document under `key`. Returns whether one existed.
    pub fn remove(&self, key: &str) -> Result<bool, StorageError> {
        let path = self.path_for(key)?;
        let _lock = FileLock::acquire(&path)?;

        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Lists stored keys in sorted order.
    pub fn keys(&self) -> Result<Vec<String>, StorageError> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                if validate_key(stem).is_ok() {
                    keys.push(stem.to_string());
                }
            }
        }
        keys.sort();
        Ok(keys)
    }
}

fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

/// Writes `data` to a sibling temp file, syncs it, then renames over `path`.
///
/// A crash leaves either the old file or the new one, never a truncated mix.
pub fn write_atomic(path: &Path, data: &Value) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let json = serde_json::to_string_pretty(data)?;

    let tmp_path = temp_path(path)?;
    let mut tmp_file = File::create(&tmp_path)?;
    tmp_file.write_all(json.as_bytes())?;

    // Ensure data is written to disk
    tmp_file.sync_all()?;
    drop(tmp_file);

    fs::rename(&tmp_path, path)?;
    Ok(())
}

fn temp_path(path: &Path) -> Result<PathBuf, StorageError> {
    let parent = path.parent().ok_or_else(|| {
        StorageError::IoError(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "Path has no parent directory",
        ))
    })?;
    let file_name = path.file_name().ok_or_else(|| {
        StorageError::IoError(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "Path has no file name",
        ))
    })?;

    Ok(parent.join(format!(".{}.tmp", file_name.to_string_lossy())))
}

/// A file lock guard that releases the lock when dropped.
///
/// The lock file is never removed: every writer must lock the same inode,
/// or a waiter holding a handle to a deleted file would run alongside a
/// writer that locked a freshly created one.
struct FileLock {
    #[allow(dead_code)]
    file: File,
}

impl FileLock {
    fn acquire(path: &Path) -> Result<Self, StorageError> {
        let lock_path = path.with_extension("lock");

        if let Some(parent) = lock_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        use fs2::FileExt;
        file.lock_exclusive()
            .map_err(|e| StorageError::LockError(format!("Failed to acquire lock: {}", e)))?;

        Ok(FileLock { file })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let store = DocumentStore::new(temp_dir.path());

        store.save("campaign", &json!({ "version": "0.16.0" })).unwrap();

        let loaded = store.load("campaign").unwrap().unwrap();
        assert_eq!(loaded["version"], "0.16.0");
    }

    #[test]
    fn test_load_missing_and_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = DocumentStore::new(temp_dir.path());

        assert!(store.load("campaign").unwrap().is_none());

        fs::write(temp_dir.path().join("campaign.json"), "  \n").unwrap();
        assert!(store.load("campaign").unwrap().is_none());
    }

    #[test]
    fn test_load_rejects_malformed_json() {
        let temp_dir = TempDir::new().unwrap();
        let store = DocumentStore::new(temp_dir.path());
        fs::write(temp_dir.path().join("campaign.json"), "{ nope").unwrap();

        assert!(matches!(store.load("campaign"), Err(StorageError::JsonError(_))));
    }

    #[test]
    fn test_update() {
        let temp_dir = TempDir::new().unwrap();
        let store = DocumentStore::new(temp_dir.path());

        store
            .update("counter", json!({ "count": 0 }), |data| {
                data["count"] = json!(10);
                Ok(())
            })
            .unwrap();
        store
            .update("counter", json!({ "count": 0 }), |data| {
                data["count"] = json!(data["count"].as_i64().unwrap() + 5);
                Ok(())
            })
            .unwrap();

        assert_eq!(store.load("counter").unwrap().unwrap()["count"], 15);
    }

    #[test]
    fn test_modify_writes_only_when_changed() {
        let temp_dir = TempDir::new().unwrap();
        let store = DocumentStore::new(temp_dir.path());
        let path = store.path_for("campaign").unwrap();

        assert!(store.modify("campaign", |_| ((), true)).unwrap().is_none());
        assert!(!path.exists());

        fs::write(&path, "{\"n\":1}").unwrap();
        let seen = store
            .modify("campaign", |data| (data["n"].as_i64(), false))
            .unwrap();
        assert_eq!(seen, Some(Some(1)));
        assert_eq!(fs::read_to_string(&path).unwrap(), "{\"n\":1}");

        store
            .modify("campaign", |data| {
                data["n"] = json!(2);
                ((), true)
            })
            .unwrap();
        assert_eq!(store.load("campaign").unwrap().unwrap()["n"], 2);
    }

    #[test]
    fn test_failed_update_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let store = DocumentStore::new(temp_dir.path());

        let result = store.update("campaign", json!({}), |_| {
            Err(StorageError::LockError("aborted".to_string()))
        });

        assert!(result.is_err());
        assert!(store.load("campaign").unwrap().is_none());
    }

    #[test]
    fn test_atomic_write_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = DocumentStore::new(temp_dir.path());

        store.save("campaign", &json!({ "a": 1 })).unwrap();

        assert!(!temp_dir.path().join(".campaign.json.tmp").exists());
        assert!(temp_dir.path().join("campaign.json").exists());
    }

    #[test]
    fn test_write_atomic_replaces_file_outside_store() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("exports").join("campaign.json");
        write_atomic(&path, &json!({ "version": "0.12.0" })).unwrap();
        write_atomic(&path, &json!({ "version": "0.16.0" })).unwrap();

        let written: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, json!({ "version": "0.16.0" }));
        assert!(!temp_dir.path().join("exports").join(".campaign.json.tmp").exists());
    }

    #[test]
    fn test_lock_file_outlives_guard() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("campaign.json");

        drop(FileLock::acquire(&path).unwrap());

        assert!(temp_dir.path().join("campaign.lock").exists());
        // A second guard locks the same file again
        drop(FileLock::acquire(&path).unwrap());
    }

    #[test]
    fn test_waiting_writer_excludes_new_writer() {
        use std::sync::atomic::{AtomicBool, Ordering};
        use std::sync::{Arc, mpsc};
        use std::thread;
        use std::time::Duration;

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("campaign.json");
        let first = FileLock::acquire(&path).unwrap();

        let waiter_holds = Arc::new(AtomicBool::new(false));
        let (release_tx, release_rx) = mpsc::channel::<()>();
        let waiter = {
            let path = path.clone();
            let waiter_holds = Arc::clone(&waiter_holds);
            thread::spawn(move || {
                let guard = FileLock::acquire(&path).unwrap();
                waiter_holds.store(true, Ordering::SeqCst);
                release_rx.recv().unwrap();
                waiter_holds.store(false, Ordering::SeqCst);
                drop(guard);
            })
        };

        // Let the waiter block on the held lock, then hand it over
        thread::sleep(Duration::from_millis(100));
        drop(first);
        while !waiter_holds.load(Ordering::SeqCst) {
            thread::sleep(Duration::from_millis(5));
        }

        let releaser = thread::spawn(move || {
            thread::sleep(Duration::from_millis(100));
            release_tx.send(()).unwrap();
        });
        let _third = FileLock::acquire(&path).unwrap();
        assert!(!waiter_holds.load(Ordering::SeqCst));

        releaser.join().unwrap();
        waiter.join().unwrap();
    }

    #[test]
    fn test_concurrent_updates_are_serialized() {
        use std::thread;

        let temp_dir = TempDir::new().unwrap();
        let store = DocumentStore::new(temp_dir.path());

        let workers: Vec<_> = (0..4)
            .map(|_| {
                let store = store.clone();
                thread::spawn(move || {
                    for _ in 0..25 {
                        store
                            .update("counter", json!({ "count": 0 }), |data| {
                                data["count"] = json!(data["count"].as_i64().unwrap() + 1);
                                Ok(())
                            })
                            .unwrap();
                    }
                })
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }

        assert_eq!(store.load("counter").unwrap().unwrap()["count"], 100);
    }

    #[test]
    fn test_keys_and_remove() {
        let temp_dir = TempDir::new().unwrap();
        let store = DocumentStore::new(temp_dir.path().join("nested"));

        assert!(store.keys().unwrap().is_empty());

        store.save("settings", &json!({})).unwrap();
        store.save("campaign", &json!({})).unwrap();
        fs::write(temp_dir.path().join("nested").join("notes.txt"), "x").unwrap();

        assert_eq!(store.keys().unwrap(), vec!["campaign", "settings"]);

        assert!(store.remove("settings").unwrap());
        assert!(!store.remove("settings").unwrap());
        assert_eq!(store.keys().unwrap(), vec!["campaign"]);
    }

    #[test]
    fn test_invalid_keys_are_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let store = DocumentStore::new(temp_dir.path());

        for key in ["", "../escape", "a/b", ".hidden"] {
            assert!(matches!(store.load(key), Err(StorageError::InvalidKey(_))));
        }
    }
}
