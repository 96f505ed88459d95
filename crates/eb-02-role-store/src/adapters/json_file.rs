//! # JSON File Preferences
//!
//! Preferences stored as one flat JSON object on disk. Every operation
//! re-reads the file under an exclusive `fs2` lock, so two CLI processes
//! sharing the file never lose each other's writes. Writes go to a temp
//! file first and are renamed into place.

use fs2::FileExt;
use std::collections::BTreeMap;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::domain::StorageError;
use crate::ports::PreferenceStore;

type PreferenceMap = BTreeMap<String, String>;

/// File-backed preference store.
#[derive(Debug)]
pub struct JsonFilePreferences {
    path: PathBuf,
}

/// Held while the preference file is being read or rewritten.
struct FileLock {
    file: File,
}

impl FileLock {
    fn acquire(path: &Path) -> Result<Self, StorageError> {
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(path)?;
        file.lock_exclusive()?;
        Ok(Self { file })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        #[allow(clippy::incompatible_msrv)]
        let _ = FileExt::unlock(&self.file);
    }
}

impl JsonFilePreferences {
    /// Open (or prepare to create) the preference file at `path`.
    ///
    /// Fails if the file exists but is not a JSON object of strings.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let store = Self {
            path: path.as_ref().to_path_buf(),
        };
        if let Some(parent) = store.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let _lock = store.lock()?;
        let existing = store.load()?;
        debug!(path = %store.path.display(), keys = existing.len(), "Opened preference file");
        Ok(store)
    }

    /// Location of the preference file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_path(&self) -> PathBuf {
        self.path.with_extension("lock")
    }

    fn lock(&self) -> Result<FileLock, StorageError> {
        FileLock::acquire(&self.lock_path())
    }

    fn load(&self) -> Result<PreferenceMap, StorageError> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) if text.trim().is_empty() => Ok(PreferenceMap::new()),
            Ok(text) => serde_json::from_str(&text)
                .map_err(|e| StorageError::Corrupt(format!("{}: {e}", self.path.display()))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(PreferenceMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, values: &PreferenceMap) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec_pretty(values)
            .map_err(|e| StorageError::Corrupt(e.to_string()))?;

        // Write atomically via temp file
        let temp_path = self.path.with_extension("tmp");
        let mut file = File::create(&temp_path)?;
        file.write_all(&bytes)?;
        file.sync_all()?;
        std::fs::rename(&temp_path, &self.path)?;
        Ok(())
    }

    /// Read-modify-write under the lock.
    fn update<F: FnOnce(&mut PreferenceMap)>(&self, f: F) -> Result<(), StorageError> {
        let _lock = self.lock()?;
        let mut values = self.load()?;
        f(&mut values);
        self.save(&values)
    }
}

impl PreferenceStore for JsonFilePreferences {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _lock = self.lock()?;
        Ok(self.load()?.remove(key))
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.update(|values| {
            values.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.update(|values| {
            values.remove(key);
        })
    }
}
