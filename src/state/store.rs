//! Persistent session key/value storage.
//!
//! SYSTEM CONTEXT
//! ==============
//! The auth context keeps three entries here: the access token, the refresh
//! token, and the serialized user record. They are written together and
//! removed together, so each trait method takes the whole batch.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::collections::HashMap;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";
pub const USER_KEY: &str = "user";

/// Every key owned by a session.
pub const SESSION_KEYS: [&str; 3] = [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_KEY];

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("session file io failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("session file encode failed: {0}")]
    Encode(#[from] serde_json::Error),
}

/// String-keyed storage that outlives the process.
pub trait SessionStore: Send + Sync {
    /// Read one entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write all entries in one step; readers never observe a partial batch.
    ///
    /// # Errors
    ///
    /// Returns an error if the batch could not be persisted. Nothing is
    /// written in that case.
    fn set_many(&self, entries: &[(&str, &str)]) -> Result<(), StoreError>;

    /// Remove all listed keys in one step. Missing keys are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the removal could not be persisted.
    fn remove_many(&self, keys: &[&str]) -> Result<(), StoreError>;
}

// =============================================================================
// MEMORY
// =============================================================================

/// Process-local store. Used by tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every entry currently held.
    #[must_use]
    pub fn snapshot(&self) -> HashMap<String, String> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set_many(&self, batch: &[(&str, &str)]) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        for (key, value) in batch {
            entries.insert((*key).to_owned(), (*value).to_owned());
        }
        Ok(())
    }

    fn remove_many(&self, keys: &[&str]) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        for key in keys {
            entries.remove(*key);
        }
        Ok(())
    }
}

// =============================================================================
// FILE
// =============================================================================

/// Store backed by a single JSON object file.
///
/// A missing file is an empty store. A file that cannot be decoded also reads
/// as empty; the next write replaces it. Writes go to a sibling temp file that
/// is renamed over the target.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), lock: Mutex::new(()) }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_err(&self, source: std::io::Error) -> StoreError {
        StoreError::Io { path: self.path.clone(), source }
    }

    fn load(&self) -> Result<HashMap<String, String>, StoreError> {
        let raw = match std::fs::read(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(HashMap::new()),
            Err(e) => return Err(self.io_err(e)),
        };
        match serde_json::from_slice(&raw) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "session file unreadable; treating as empty");
                Ok(HashMap::new())
            }
        }
    }

    fn persist(&self, entries: &HashMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| self.io_err(e))?;
        }

        let encoded = serde_json::to_vec_pretty(entries)?;
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(format!(".{}.tmp", uuid::Uuid::new_v4().simple()));
        let tmp = PathBuf::from(tmp);

        if let Err(e) = write_private(&tmp, &encoded) {
            let _ = std::fs::remove_file(&tmp);
            return Err(self.io_err(e));
        }
        if let Err(e) = std::fs::rename(&tmp, &self.path) {
            let _ = std::fs::remove_file(&tmp);
            return Err(self.io_err(e));
        }
        Ok(())
    }
}

/// Write `bytes` to a new file readable only by the owner.
fn write_private(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut options = std::fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

impl SessionStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(self.load()?.remove(key))
    }

    fn set_many(&self, batch: &[(&str, &str)]) -> Result<(), StoreError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut entries = self.load()?;
        for (key, value) in batch {
            entries.insert((*key).to_owned(), (*value).to_owned());
        }
        self.persist(&entries)
    }

    fn remove_many(&self, keys: &[&str]) -> Result<(), StoreError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut entries = self.load()?;
        for key in keys {
            entries.remove(*key);
        }
        if entries.is_empty() {
            return match std::fs::remove_file(&self.path) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
                Err(e) => Err(self.io_err(e)),
            };
        }
        self.persist(&entries)
    }
}
