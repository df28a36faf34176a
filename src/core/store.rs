//! # Local Store
//!
//! Device-local key-value storage at `~/.agrilease/store.json`.
//!
//! Keys are namespaced (`agrilease_<key>`) and values are stored as JSON.
//! Reads never fail: a missing file, missing key or undecodable value falls
//! back to `None`. Writes go through an atomic rename.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

pub const NAMESPACE: &str = "agrilease_";

/// Returns `~/.agrilease/`, creating it if needed.
pub fn data_dir() -> io::Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no home directory"))?;
    let dir = home.join(".agrilease");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

fn namespaced(key: &str) -> String {
    format!("{NAMESPACE}{key}")
}

/// Atomically write `data` as JSON to `path` (via `.tmp` + rename).
fn atomic_write_json<T: Serialize>(path: &Path, data: &T) -> io::Result<()> {
    let tmp_path = path.with_extension("tmp");
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(&tmp_path, json)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}

#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    /// The store under the user's home directory.
    pub fn open_default() -> io::Result<Self> {
        Ok(Self::at(data_dir()?.join("store.json")))
    }

    /// A store backed by the file at `path`.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_all(&self) -> io::Result<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let json = fs::read_to_string(&self.path)?;
        serde_json::from_str(&json).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    fn save_all(&self, entries: &Map<String, Value>) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        atomic_write_json(&self.path, entries)
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let entries = match self.load_all() {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Store unreadable at {}: {}", self.path.display(), e);
                return None;
            }
        };
        let value = entries.get(&namespaced(key))?.clone();
        match serde_json::from_value(value) {
            Ok(v) => Some(v),
            Err(e) => {
                debug!("Store value for {key} did not decode: {e}");
                None
            }
        }
    }

    pub fn get_or<T: DeserializeOwned>(&self, key: &str, fallback: T) -> T {
        self.get(key).unwrap_or(fallback)
    }

    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> io::Result<()> {
        let value = serde_json::to_value(value).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        // A corrupt file is replaced rather than blocking every write
        let mut entries = self.load_all().unwrap_or_default();
        entries.insert(namespaced(key), value);
        self.save_all(&entries)
    }

    pub fn remove(&self, key: &str) -> io::Result<()> {
        let mut entries = self.load_all().unwrap_or_default();
        if entries.remove(&namespaced(key)).is_some() {
            self.save_all(&entries)?;
        }
        Ok(())
    }
}
