//! # Persistence
//!
//! Opaque key-value storage for editor state which outlives a session. Values
//! are stored as given, it's up to the caller to serialise them.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use std::{
    collections::HashMap,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use log::trace;
use thiserror::Error;

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// A store of string values under string keys.
pub trait KvStore {
    /// Get the value stored under `key`, or `None` if nothing is stored.
    fn get(&self, key: &str) -> Result<Option<String>, PersistError>;

    /// Store `value` under `key`, replacing anything already there.
    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistError>;
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Stores each key as a file in a directory.
#[derive(Debug, Clone)]
pub struct FileKvStore {
    root: PathBuf,
}

/// Stores values in memory only.
#[derive(Debug, Clone, Default)]
pub struct MemKvStore {
    values: HashMap<String, String>,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("Key {0:?} can't be used as a file name")]
    InvalidKey(String),

    #[error("Could not read {0:?}: {1}")]
    ReadError(PathBuf, std::io::Error),

    #[error("Could not write {0:?}: {1}")]
    WriteError(PathBuf, std::io::Error),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl FileKvStore {
    /// Create a store in the given directory, which must already exist.
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    fn key_path(&self, key: &str) -> Result<PathBuf, PersistError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

        if !valid {
            return Err(PersistError::InvalidKey(key.to_string()));
        }

        Ok(self.root.join(format!("{}.json", key)))
    }
}

impl KvStore for FileKvStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistError> {
        let path = self.key_path(key)?;

        match fs::read_to_string(&path) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(PersistError::ReadError(path, e)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistError> {
        let path = self.key_path(key)?;

        fs::write(&path, value).map_err(|e| PersistError::WriteError(path.clone(), e))?;

        trace!("Saved {} bytes to {:?}", value.len(), path);

        Ok(())
    }
}

impl KvStore for MemKvStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
