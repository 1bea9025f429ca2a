//! Flat key-value configuration persisted as indented JSON
//!
//! The store holds plain `String -> String` pairs. Reading never writes;
//! callers that want a default persisted use [`ConfigStore::set_default_if_absent`].

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Default config location, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

/// The single key the redaction tool reads and writes.
pub const SERVER_ADDRESS_KEY: &str = "ServerAddress";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug)]
pub struct ConfigStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl ConfigStore {
    /// Loads the store from `path`, creating an empty file first when none
    /// exists. A structurally invalid file fails the load.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if !path.exists() {
            std::fs::write(&path, "{}")?;
        }

        let content = std::fs::read_to_string(&path)?;
        let values: BTreeMap<String, String> = serde_json::from_str(&content)?;

        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn try_get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Sets `key` and persists the whole store immediately.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> Result<()> {
        self.values.insert(key.into(), value.into());
        self.save()
    }

    /// Persists `default` under `key` only when the key is missing.
    pub fn set_default_if_absent(&mut self, key: &str, default: &str) -> Result<()> {
        if !self.values.contains_key(key) {
            self.set(key, default)?;
        }
        Ok(())
    }

    fn save(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.values)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}
