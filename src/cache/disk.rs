//! Single-file key-value cache persisted as JSON
//!
//! Provides a `DiskCache` that loads its whole mapping from one file, serves it
//! from memory, and writes the whole mapping back when released.

use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;
use std::fs;
use std::hash::Hash;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// In-memory mapping backed by a single JSON file
///
/// The in-memory map is authoritative while the cache is held. The file is only
/// ever replaced as a whole, via a temporary sibling file and a rename.
/// A missing or unreadable file loads as an empty cache, and a failed flush is
/// logged and dropped.
#[derive(Debug)]
pub struct DiskCache<K, V> {
    /// File the mapping is loaded from and flushed to
    path: PathBuf,
    entries: HashMap<K, V>,
}

impl<K, V> DiskCache<K, V>
where
    K: Eq + Hash + Serialize + DeserializeOwned,
    V: Serialize + DeserializeOwned,
{
    /// Loads the cache from `path`
    ///
    /// Never fails: a missing file, an I/O error, or content that does not
    /// parse as the expected mapping all yield an empty cache.
    pub fn acquire(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = read_from_disk(&path);
        Self { path, entries }
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.get(key)
    }

    /// Inserts or overwrites the entry for `key`
    pub fn set(&mut self, key: K, value: V) {
        self.entries.insert(key, value);
    }

    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.entries.remove(key)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the full mapping to the cache file, replacing any existing content
    ///
    /// # Returns
    /// * `Ok(())` on success
    /// * `Err` if directory creation, serialization, writing, or the final rename fails
    pub fn persist(&self) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string(&self.entries)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        let tmp_path = tmp_path_for(&self.path);
        fs::write(&tmp_path, json)?;
        if let Err(e) = fs::rename(&tmp_path, &self.path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e);
        }
        Ok(())
    }

    /// Flushes the cache to disk and gives it up
    ///
    /// Flush failures are logged, not returned.
    pub fn release(self) {
        match self.persist() {
            Ok(()) => debug!(
                path = %self.path.display(),
                entries = self.entries.len(),
                "flushed cache"
            ),
            Err(e) => warn!(
                path = %self.path.display(),
                error = %e,
                "failed to flush cache, updates are lost"
            ),
        }
    }
}

fn read_from_disk<K, V>(path: &Path) -> HashMap<K, V>
where
    K: Eq + Hash + DeserializeOwned,
    V: DeserializeOwned,
{
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no cache file, starting empty");
            return HashMap::new();
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "cannot read cache file, starting empty");
            return HashMap::new();
        }
    };

    match serde_json::from_str(&content) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "corrupt cache file, starting empty");
            HashMap::new()
        }
    }
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}
