//! Application configuration
//!
//! Configuration loaded from .bookmarks-manager.toml.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::paths::{default_bookmarks_path, expand_home};

/// Whether incognito windows may be opened from the manager
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncognitoAvailability {
    #[default]
    Enabled,
    Disabled,
    Forced,
}

/// Application configuration loaded from .bookmarks-manager.toml
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    /// Bookmarks tree file (JSON). Defaults to bookmarks.json in the config directory
    #[serde(default)]
    pub bookmarks_file: Option<String>,

    /// Whether bookmarks may be created, edited, moved or removed
    #[serde(default = "default_true")]
    pub can_edit: bool,

    #[serde(default)]
    pub incognito: IncognitoAvailability,

    /// Folders up to this depth are open unless explicitly closed
    #[serde(default = "default_open_depth")]
    pub open_depth: usize,

    /// Remember which folders were opened or closed between runs
    #[serde(default = "default_true")]
    pub persist_folder_state: bool,

    /// Print bookmark URLs next to titles
    #[serde(default = "default_true")]
    pub show_urls: bool,
}

fn default_true() -> bool {
    true
}

fn default_open_depth() -> usize {
    1
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bookmarks_file: None,
            can_edit: default_true(),
            incognito: IncognitoAvailability::default(),
            open_depth: default_open_depth(),
            persist_folder_state: default_true(),
            show_urls: default_true(),
        }
    }
}

impl AppConfig {
    /// Load the first config file found, falling back to defaults
    ///
    /// A file that fails to parse is reported and skipped rather than
    /// aborting startup.
    pub fn load() -> Self {
        Self::from_file(crate::load_config_file())
    }

    fn from_file(file: Option<(PathBuf, String)>) -> Self {
        let Some((path, content)) = file else {
            log::debug!("No config file, using defaults");
            return Self::default();
        };
        match toml::from_str(&content) {
            Ok(config) => {
                log::info!("Loaded app config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("Ignoring invalid config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// The configured bookmarks file with `~` expanded, or the default location
    pub fn bookmarks_path(&self) -> anyhow::Result<PathBuf> {
        match &self.bookmarks_file {
            Some(file) => Ok(expand_home(file, dirs::home_dir().as_deref())),
            None => default_bookmarks_path(),
        }
    }
}
