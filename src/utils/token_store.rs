//! Client-local persistent storage for the credential
//!
//! A small JSON key/value file; the credential sits under `TOKEN_STORAGE_KEY`.

use crate::constants::TOKEN_STORAGE_KEY;
use crate::utils::error_handling::safe_lock;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Storage file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Where the credential lives between runs
pub trait TokenStore: Send + Sync {
    fn get(&self) -> Option<String>;
    fn set(&self, token: &str) -> Result<(), StoreError>;
    fn remove(&self) -> Result<(), StoreError>;
}

/// File-backed store; other keys in the file are preserved on write
///
/// Every read and write goes back to the file, so a credential written or
/// removed by another process (a second CLI run) is seen on the next call.
pub struct FileTokenStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>, // Last contents seen on disk
}

impl FileTokenStore {
    /// Open the store, loading existing entries; a missing file is an empty store
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = read_entries(&path)?;

        log::debug!(
            "[TokenStore] Opened {} ({} entries)",
            path.display(),
            entries.len()
        );

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let json = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, json).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

fn read_entries(path: &Path) -> Result<BTreeMap<String, String>, StoreError> {
    match std::fs::read_to_string(path) {
        Ok(contents) if contents.trim().is_empty() => Ok(BTreeMap::new()),
        Ok(contents) => Ok(serde_json::from_str(&contents)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
        Err(source) => Err(StoreError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self) -> Option<String> {
        let mut entries = safe_lock(&self.entries, "TokenStore");
        match read_entries(&self.path) {
            Ok(fresh) => *entries = fresh,
            Err(e) => log::warn!("[TokenStore] Re-read failed, using last contents: {}", e),
        }
        entries.get(TOKEN_STORAGE_KEY).cloned()
    }

    fn set(&self, token: &str) -> Result<(), StoreError> {
        let mut entries = safe_lock(&self.entries, "TokenStore");
        *entries = read_entries(&self.path)?;
        entries.insert(TOKEN_STORAGE_KEY.to_string(), token.to_string());
        self.persist(&entries)
    }

    fn remove(&self) -> Result<(), StoreError> {
        let mut entries = safe_lock(&self.entries, "TokenStore");
        *entries = read_entries(&self.path)?;
        if entries.remove(TOKEN_STORAGE_KEY).is_none() {
            return Ok(());
        }
        self.persist(&entries)
    }
}

/// Process-local store for tests and throwaway sessions
#[derive(Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        Self {
            token: Mutex::new(Some(token.to_string())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Option<String> {
        safe_lock(&self.token, "TokenStore").clone()
    }

    fn set(&self, token: &str) -> Result<(), StoreError> {
        *safe_lock(&self.token, "TokenStore") = Some(token.to_string());
        Ok(())
    }

    fn remove(&self) -> Result<(), StoreError> {
        *safe_lock(&self.token, "TokenStore") = None;
        Ok(())
    }
}
