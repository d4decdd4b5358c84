use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::KeyValueStore;
use crate::error::{Error, Result};

const STORAGE_FILE_NAME: &str = "storage.json";

/// Default on-disk location, e.g. `~/.local/share/studybuddy/storage.json`.
pub fn default_storage_path() -> PathBuf {
    dirs::data_local_dir()
        .or_else(dirs::data_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("studybuddy")
        .join(STORAGE_FILE_NAME)
}

/// Store persisted as one JSON object on disk.
///
/// Every operation re-reads the file so separate processes observe each
/// other's writes. The mutex only serializes access within this process.
/// A file that does not parse is treated as empty and replaced by the next
/// write. Writes go through a sibling temp file and a rename.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let raw = std::fs::read_to_string(&self.path)?;
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        match serde_json::from_str(&raw) {
            Ok(items) => Ok(items),
            Err(error) => {
                tracing::warn!(
                    path = %self.path.display(),
                    "Ignoring unreadable storage file: {}",
                    error
                );
                Ok(BTreeMap::new())
            }
        }
    }

    fn write_all(&self, items: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let serialized = serde_json::to_string_pretty(items)?;
        let staging = self.staging_path();
        std::fs::write(&staging, serialized)?;
        std::fs::rename(&staging, &self.path)?;
        Ok(())
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(std::ffi::OsStr::to_os_string)
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn with_lock<T>(&self, f: impl FnOnce() -> Result<T>) -> Result<T> {
        let _guard = self
            .lock
            .lock()
            .map_err(|error| Error::Storage(error.to_string()))?;
        f()
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.with_lock(|| Ok(self.read_all()?.get(key).cloned()))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.with_lock(|| {
            let mut items = self.read_all()?;
            items.insert(key.to_string(), value.to_string());
            self.write_all(&items)
        })
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.with_lock(|| {
            let mut items = self.read_all()?;
            if items.remove(key).is_some() {
                self.write_all(&items)?;
            }
            Ok(())
        })
    }
}
