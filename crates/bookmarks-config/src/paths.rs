//! Configuration and data directory paths
//!
//! Directories come from `dirs`; each gets a `bookmarks-manager` subdirectory
//! that is created on first use.
//!
//! Platform-specific locations:
//! - Linux: `~/.config/bookmarks-manager/`, `~/.cache/bookmarks-manager/`
//! - macOS: `~/Library/Application Support/bookmarks-manager/`, `~/Library/Caches/bookmarks-manager/`
//! - Windows: `%APPDATA%\bookmarks-manager\`, `%LOCALAPPDATA%\bookmarks-manager\`

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

const APP_NAME: &str = "bookmarks-manager";

fn app_dir(base: Option<PathBuf>, kind: &str) -> Result<PathBuf> {
    let dir = base
        .with_context(|| format!("Could not determine {} directory", kind))?
        .join(APP_NAME);
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create {} directory {}", kind, dir.display()))?;
    Ok(dir)
}

/// Folder state and the default bookmarks file live here
pub fn config_dir() -> Result<PathBuf> {
    app_dir(dirs::config_dir(), "config")
}

/// Log files live here
pub fn cache_dir() -> Result<PathBuf> {
    app_dir(dirs::cache_dir(), "cache")
}

pub fn folder_state_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("folder-state.toml"))
}

/// Used when neither the command line nor the config names a bookmarks file
pub fn default_bookmarks_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("bookmarks.json"))
}

/// Resolve a leading `~` against `home`
pub fn expand_home(path: &str, home: Option<&Path>) -> PathBuf {
    let rest = match path.strip_prefix('~') {
        Some("") => "",
        Some(rest) if rest.starts_with(['/', '\\']) => &rest[1..],
        _ => return PathBuf::from(path),
    };
    match home {
        Some(home) => home.join(rest),
        None => PathBuf::from(path),
    }
}
