// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Durable key-value storage for session state.
//!
//! Values are opaque strings (JSON in practice). Readers treat missing or
//! unreadable values as absent; see [`load_or_default`].

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Error type for storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error.
    #[error("storage io error: {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Key contains characters unsafe for a file name.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    /// Value could not be serialized.
    #[error("failed to serialize {key}: {message}")]
    Serialize { key: String, message: String },
}

/// A durable string store keyed by name.
pub trait Storage {
    /// Read the value for `key`, `None` if never written.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write the value for `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory storage (tests and embedding).
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One `<key>.json` file per key inside a data directory.
///
/// Writes go to a temporary sibling first and are renamed into place, so a
/// crash mid-write leaves the previous value intact.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing `key`.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io { path, source }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.dir).map_err(|source| StorageError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value).map_err(|source| StorageError::Io {
            path: tmp.clone(),
            source,
        })?;
        std::fs::rename(&tmp, &path).map_err(|source| StorageError::Io {
            path: path.clone(),
            source,
        })?;

        tracing::debug!("persisted {} ({} bytes)", path.display(), value.len());
        Ok(())
    }
}

fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

/// Read and parse `key`, falling back to `default` when the value is
/// missing, unreadable, or corrupt.
///
/// Corruption is logged, never surfaced: stored state is a convenience and
/// losing it must not stop the application.
pub fn load_or_default<T, E, P, D>(storage: &dyn Storage, key: &str, parse: P, default: D) -> T
where
    E: std::fmt::Display,
    P: FnOnce(&str) -> Result<T, E>,
    D: FnOnce() -> T,
{
    let raw = match storage.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            tracing::debug!("{} not stored, using defaults", key);
            return default();
        }
        Err(e) => {
            tracing::warn!("failed to read {}: {}, using defaults", key, e);
            return default();
        }
    };

    match parse(&raw) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("stored {} is corrupt ({}), using defaults", key, e);
            default()
        }
    }
}

#[cfg(test)]
#[path = "storage_tests.rs"]
mod tests;
