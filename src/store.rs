//! Key-value persistence over JSON files in the painel home directory.
//!
//! Each key maps to one file, `<key>.json`, holding the full serialized value.
//! Collections are rewritten whole on every mutation; there is no partial
//! update and no coordination between processes (last write wins).

use crate::Result;
use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};

pub(crate) const CLIENTS_KEY: &str = "clients";
pub(crate) const DEADLINES_KEY: &str = "deadlines";
pub(crate) const TASKS_KEY: &str = "tasks";
pub(crate) const CAMPAIGNS_KEY: &str = "campaigns";
pub(crate) const TRANSACTIONS_KEY: &str = "transactions";
pub(crate) const DARK_MODE_KEY: &str = "dark_mode";
pub(crate) const MONTHLY_DATA_KEY: &str = "monthly_data";
pub(crate) const PROJECT_STATUS_KEY: &str = "project_status";

/// A persistent string store keyed by name, one JSON file per key.
///
/// Reads are forgiving: a missing or unreadable file is treated as "no data"
/// and never produces an error. Writes go through `anyhow` with context so a
/// failed write is reported to the caller.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Store {
    root: PathBuf,
}

impl Store {
    /// Creates a store rooted at `root`. The directory must already exist
    /// (it is created by `Config::create`).
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }

    /// Returns the raw stored string for `key`, or `None` if the key has
    /// never been written or the file cannot be read.
    pub async fn get(&self, key: &str) -> Option<String> {
        tokio::fs::read_to_string(self.path(key)).await.ok()
    }

    /// Writes `contents` under `key`, replacing any previous value.
    pub async fn set(&self, key: &str, contents: impl AsRef<[u8]>) -> Result<()> {
        let path = self.path(key);
        tokio::fs::write(&path, contents)
            .await
            .with_context(|| format!("Unable to write to {}", path.display()))
    }

    /// Removes `key` from the store. Removing a key that does not exist is
    /// a no-op.
    pub async fn remove(&self, key: &str) -> Result<()> {
        let path = self.path(key);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => {
                Err(e).with_context(|| format!("Unable to remove key file {}", path.display()))
            }
        }
    }

    /// Reads and deserializes the value stored under `key`. Any failure,
    /// whether a missing file or a corrupt snapshot, yields `None` so callers
    /// can substitute their default.
    pub async fn read_json<T>(&self, key: &str) -> Option<T>
    where
        T: DeserializeOwned,
    {
        let content = self.get(key).await?;
        serde_json::from_str(&content).ok()
    }

    /// Serializes `value` and stores it under `key`.
    pub async fn write_json<T>(&self, key: &str, value: &T) -> Result<()>
    where
        T: Serialize,
    {
        let data = serde_json::to_string_pretty(value)
            .with_context(|| format!("Unable to serialize value for key '{key}'"))?;
        self.set(key, data).await
    }
}
