use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::model::{ConsoleConfig, ConsoleState};

mod kv;
mod prefs;
mod tokens;

pub use self::kv::{FileKv, KeyValueStore, MemoryKv};
pub use self::prefs::{PINNED_KEY, PinnedBusinesses, SUPPORT_NOTES_KEY, SupportNotes};

pub const HOME_ENV: &str = "NVI_CONSOLE_HOME";
pub const TOKEN_ENV: &str = "NVI_CONSOLE_TOKEN";
const HOME_DIR: &str = ".nvi-console";

/// The console's on-disk home: `config.json`, `state.json` (tokens) and
/// `storage.json` (pinned businesses, support notes).
#[derive(Clone, Debug)]
pub struct ConsoleStore {
    root: PathBuf,
}

impl ConsoleStore {
    /// `--data-dir`, else `$NVI_CONSOLE_HOME`, else `$HOME/.nvi-console`.
    pub fn resolve_root(explicit: Option<&Path>) -> Result<PathBuf> {
        if let Some(p) = explicit {
            return Ok(p.to_path_buf());
        }
        if let Some(p) = std::env::var_os(HOME_ENV) {
            return Ok(PathBuf::from(p));
        }
        let home = std::env::var_os("HOME")
            .context("HOME is not set (pass --data-dir or set NVI_CONSOLE_HOME)")?;
        Ok(PathBuf::from(home).join(HOME_DIR))
    }

    pub fn open(root: &Path) -> Result<Self> {
        fs::create_dir_all(root)
            .with_context(|| format!("create data dir {}", root.display()))?;
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn storage_path(&self) -> PathBuf {
        self.root.join("storage.json")
    }

    pub fn log_path(&self) -> PathBuf {
        self.root.join("console.log")
    }

    pub fn kv(&self) -> FileKv {
        FileKv::new(self.storage_path())
    }

    pub fn read_config(&self) -> Result<ConsoleConfig> {
        let path = self.root.join("config.json");
        if !path.exists() {
            return Ok(ConsoleConfig::default());
        }
        let bytes = fs::read(&path).context("read config.json")?;
        let cfg: ConsoleConfig = serde_json::from_slice(&bytes).context("parse config.json")?;
        if cfg.version != 1 {
            anyhow::bail!("unsupported console config version {}", cfg.version);
        }
        Ok(cfg)
    }

    pub fn write_config(&self, cfg: &ConsoleConfig) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(cfg).context("serialize config")?;
        write_atomic(&self.root.join("config.json"), &bytes).context("write config.json")?;
        Ok(())
    }

    pub fn read_state(&self) -> Result<ConsoleState> {
        let path = self.root.join("state.json");
        if !path.exists() {
            return Ok(ConsoleState {
                version: 1,
                tokens: std::collections::HashMap::new(),
            });
        }
        let bytes = fs::read(&path).context("read state.json")?;
        let st: ConsoleState = serde_json::from_slice(&bytes).context("parse state.json")?;
        Ok(st)
    }

    pub fn write_state(&self, st: &ConsoleState) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(st).context("serialize state")?;
        write_atomic(&self.root.join("state.json"), &bytes).context("write state.json")?;
        Ok(())
    }
}

pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("create parent directories")?;
    }
    let tmp = path.with_extension(format!("tmp.{}", std::process::id()));
    fs::write(&tmp, bytes).with_context(|| format!("write temp file {}", tmp.display()))?;
    fs::rename(&tmp, path)
        .with_context(|| format!("rename {} -> {}", tmp.display(), path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
