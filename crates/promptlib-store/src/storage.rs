//! Key-value backends for the persisted slot.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors raised by a storage backend
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Storage quota exceeded: need {needed} bytes, limit is {limit}")]
    QuotaExceeded { needed: usize, limit: usize },
}

/// Synchronous string key-value storage, shaped like browser local storage.
pub trait KeyValueStorage {
    /// Read the value stored under `key`, if any.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite the value stored under `key`.
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-process storage with an optional size limit.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
    quota: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit the total bytes of keys plus values that may be stored.
    pub fn with_quota(quota: usize) -> Self {
        Self {
            items: HashMap::new(),
            quota: Some(quota),
        }
    }

    fn used_without(&self, key: &str) -> usize {
        self.items
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if let Some(limit) = self.quota {
            let needed = self.used_without(key) + key.len() + value.len();
            if needed > limit {
                return Err(StorageError::QuotaExceeded { needed, limit });
            }
        }
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Storage that keeps one file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Use `dir` for storage. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Storage under the default data directory.
    pub fn open_default() -> Self {
        Self::new(Self::default_dir())
    }

    /// The default location is `~/.local/share/promptlib` on Linux.
    pub fn default_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("promptlib")
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing `key`. ASCII letters, digits and `-` are kept; every
    /// other byte (including `_`) is written as `_XX` hex, so distinct keys
    /// never share a file.
    pub fn path_for(&self, key: &str) -> PathBuf {
        let mut name = String::with_capacity(key.len());
        for byte in key.bytes() {
            if byte.is_ascii_alphanumeric() || byte == b'-' {
                name.push(byte as char);
            } else {
                name.push_str(&format!("_{:02X}", byte));
            }
        }
        self.dir.join(format!("{}.json", name))
    }
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);

        // Write the whole value beside the slot, then swap it in
        let tmp_path = path.with_extension("json.tmp");
        std::fs::write(&tmp_path, value)?;
        std::fs::rename(&tmp_path, &path)?;
        Ok(())
    }
}
