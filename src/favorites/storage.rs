//! Key-value persistence backends.
//!
//! Each key holds one string value. The file backend keeps one
//! `<key>.json` file per key and replaces it atomically (write to a temp file,
//! then rename) so a crash mid-write never leaves a truncated blob.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use crate::error::{MarqueeError, Result};

/// String-keyed persistent storage
pub trait KeyValueStore: Send + Sync {
    /// Read a key. A key that was never written is `Ok(None)`.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite a key wholesale.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// One JSON file per key under a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(MarqueeError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read {}: {}", path.display(), e),
            ))),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|e| {
            MarqueeError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to create {}: {}", self.dir.display(), e),
            ))
        })?;

        let path = self.path_for(key);
        let temp_path = self.dir.join(format!(".{key}.json.tmp"));

        fs::write(&temp_path, value)?;
        fs::rename(&temp_path, &path).map_err(|e| {
            MarqueeError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to replace {}: {}", path.display(), e),
            ))
        })?;

        tracing::debug!(path = %path.display(), bytes = value.len(), "persisted key");
        Ok(())
    }
}

/// Process-local storage, nothing survives the process
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(self, key: &str, value: &str) -> Self {
        self.entries.lock().insert(key.to_string(), value.to_string());
        self
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}
