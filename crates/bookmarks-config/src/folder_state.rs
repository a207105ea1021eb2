//! Folder open/closed state persistence
//!
//! Folder overrides are stored in `~/.config/bookmarks-manager/folder-state.toml`
//! so folders stay collapsed or expanded across runs.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::paths;

const FOLDER_STATE_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderStateMeta {
    pub last_modified: DateTime<Utc>,
    pub version: u32,
}

/// Persisted folder overrides keyed by bookmark id (`true` = open)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderStateFile {
    pub meta: FolderStateMeta,
    #[serde(default)]
    pub folders: BTreeMap<String, bool>,
}

impl Default for FolderStateFile {
    fn default() -> Self {
        Self {
            meta: FolderStateMeta {
                last_modified: Utc::now(),
                version: FOLDER_STATE_VERSION,
            },
            folders: BTreeMap::new(),
        }
    }
}

impl FolderStateFile {
    pub fn new(folders: BTreeMap<String, bool>) -> Self {
        Self {
            folders,
            ..Self::default()
        }
    }

    /// Load from the config directory, or defaults when missing or unreadable
    pub fn load() -> Self {
        if let Ok(path) = paths::folder_state_path() {
            if path.exists() {
                match Self::load_from_path(&path) {
                    Ok(state) => {
                        log::info!("Loaded folder state from {:?}", path);
                        return state;
                    }
                    Err(e) => log::warn!("Ignoring folder state: {:#}", e),
                }
            }
        }

        log::debug!("No folder state found, using defaults");
        Self::default()
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read folder state file: {:?}", path))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse folder state file: {:?}", path))
    }

    /// Save to the config directory
    pub fn save(&mut self) -> Result<()> {
        let path = paths::folder_state_path()?;
        self.save_to_path(&path)
    }

    pub fn save_to_path(&mut self, path: &Path) -> Result<()> {
        self.meta.last_modified = Utc::now();
        let content = toml::to_string_pretty(self).context("Failed to serialize folder state")?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, content)
            .with_context(|| format!("Failed to write folder state file: {:?}", path))?;

        log::debug!("Saved folder state to {:?}", path);
        Ok(())
    }
}
