//! Configuration and file management for bookmarks-manager
//!
//! This crate provides:
//! - Config and cache directory paths
//! - Configuration file loading (TOML)
//! - Application configuration (AppConfig)
//! - Folder open/closed state persistence

pub mod app_config;
pub mod config_file;
pub mod folder_state;
pub mod paths;

pub use app_config::{AppConfig, IncognitoAvailability};
pub use config_file::{load_config_file, CONFIG_ENV};
pub use folder_state::FolderStateFile;
pub use paths::{cache_dir, config_dir, default_bookmarks_path, expand_home, folder_state_path};
