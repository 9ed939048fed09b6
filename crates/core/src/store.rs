//! On-disk store of raw endpoint responses
//!
//! Every entry is a flat file named after its [`CacheKey`]:
//!
//! ```text
//! .rqcache/cache/
//!   3f1c...e9.json   (raw response body)
//!   b94d...de9.json
//! ```
//!
//! Entries are written once and never modified or deleted. A write goes to a
//! temporary file in the same directory which is synced and then renamed onto
//! the entry path, so readers never observe a partially written entry.

use crate::key::CacheKey;
use crate::{Error, Result};
use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Flat directory of cached response bodies
#[derive(Debug, Clone)]
pub struct CacheStore {
    root: PathBuf,
}

impl CacheStore {
    /// Create a store rooted at the given directory. Nothing is touched on disk.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Get the cache root directory
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the entry file for a key
    #[must_use]
    pub fn entry_path(&self, key: &CacheKey) -> PathBuf {
        self.root.join(key.file_name())
    }

    /// List the keys of all entries currently in the directory
    ///
    /// Files that are not named `<64 hex>.json`, and subdirectories, are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CacheDirectory`] if the directory is missing or unreadable
    pub fn scan(&self) -> Result<HashSet<CacheKey>> {
        let entries =
            fs::read_dir(&self.root).map_err(|e| Error::cache_directory(e, &self.root))?;

        let mut keys = HashSet::new();
        for entry in entries {
            let entry = entry.map_err(|e| Error::cache_directory(e, &self.root))?;
            let is_file = entry.file_type().is_ok_and(|t| t.is_file());
            let key = entry
                .file_name()
                .to_str()
                .and_then(CacheKey::from_file_name);

            match key {
                Some(key) if is_file => {
                    keys.insert(key);
                }
                _ => trace!(path = ?entry.path(), "Ignoring non-entry in cache directory"),
            }
        }

        debug!(root = ?self.root, entries = keys.len(), "Scanned cache directory");
        Ok(keys)
    }

    /// Write a response body as the entry for `key`
    ///
    /// Creates the cache directory (and parents) if needed. An existing entry
    /// for the same key is replaced atomically.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CacheDirectory`] if the directory cannot be created and
    /// [`Error::CacheWrite`] if writing, syncing or renaming the entry fails
    pub fn write(&self, key: &CacheKey, body: &[u8]) -> Result<PathBuf> {
        fs::create_dir_all(&self.root).map_err(|e| Error::cache_directory(e, &self.root))?;

        let path = self.entry_path(key);
        let mut tmp = tempfile::Builder::new()
            .prefix(".tmp-")
            .tempfile_in(&self.root)
            .map_err(|e| Error::cache_write(e, &self.root, "create"))?;

        tmp.write_all(body)
            .map_err(|e| Error::cache_write(e, tmp.path(), "write"))?;
        tmp.as_file()
            .sync_all()
            .map_err(|e| Error::cache_write(e, tmp.path(), "sync"))?;

        // Atomic rename to final location
        tmp.persist(&path)
            .map_err(|e| Error::cache_write(e.error, &path, "persist"))?;

        debug!(%key, ?path, bytes = body.len(), "Stored response in cache");
        Ok(path)
    }

    /// Read the raw body of the entry for `key`
    ///
    /// # Errors
    ///
    /// Returns [`Error::CacheRead`] if the entry is missing or unreadable
    pub fn read(&self, key: &CacheKey) -> Result<Vec<u8>> {
        let path = self.entry_path(key);
        fs::read(&path).map_err(|e| Error::cache_read(e, &path))
    }

    /// Check if an entry exists on disk
    #[must_use]
    pub fn exists(&self, key: &CacheKey) -> bool {
        self.entry_path(key).is_file()
    }
}
