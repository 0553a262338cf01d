use crate::{PantryError, Result};
use std::collections::HashMap;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Mutex;

/// Durable key/value storage for serialized client state.
pub trait PantryStorage: Send + Sync {
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the whole value stored under `key`.
    fn write(&self, key: &str, value: &str) -> Result<()>;
}

#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    File,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(raw: &str) -> std::result::Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(Self::File),
            "memory" | "mem" => Ok(Self::Memory),
            other => Err(format!(
                "Unknown storage backend '{other}' (expected file|memory)"
            )),
        }
    }
}

/// One JSON file per key under a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(PantryError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl PantryStorage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(PantryError::Storage { path, source }),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.dir).map_err(|source| PantryError::Storage {
            path: self.dir.clone(),
            source,
        })?;

        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value).map_err(|source| PantryError::Storage {
            path: tmp.clone(),
            source,
        })?;
        std::fs::rename(&tmp, &path).map_err(|source| PantryError::Storage {
            path: path.clone(),
            source,
        })?;
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: &str, value: &str) -> Self {
        let storage = Self::new();
        storage
            .values
            .lock()
            .expect("memory storage mutex poisoned")
            .insert(key.to_string(), value.to_string());
        storage
    }
}

impl PantryStorage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self
            .values
            .lock()
            .expect("memory storage mutex poisoned")
            .get(key)
            .cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        self.values
            .lock()
            .expect("memory storage mutex poisoned")
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
