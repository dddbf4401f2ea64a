use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result};

use super::write_atomic;

/// String key/value persistence handed to the console as a capability.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// A JSON object on disk, rewritten whole on every `set`.
///
/// There is no locking: two consoles sharing a data dir overwrite each
/// other's keys, last writer wins.
#[derive(Clone, Debug)]
pub struct FileKv {
    path: PathBuf,
}

impl FileKv {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let bytes = std::fs::read(&self.path)
            .with_context(|| format!("read {}", self.path.display()))?;
        // A corrupt file is treated like an empty one rather than locking
        // the operator out of the console.
        Ok(serde_json::from_slice(&bytes).unwrap_or_default())
    }
}

impl KeyValueStore for FileKv {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut all = self.read_all()?;
        all.insert(key.to_string(), value.to_string());
        let bytes = serde_json::to_vec_pretty(&all).context("serialize storage")?;
        write_atomic(&self.path, &bytes)
            .with_context(|| format!("write {}", self.path.display()))
    }
}

#[derive(Clone, Debug, Default)]
pub struct MemoryKv {
    values: BTreeMap<String, String>,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKv {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
