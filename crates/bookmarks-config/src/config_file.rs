use std::path::PathBuf;

const CONFIG_FILE: &str = ".bookmarks-manager.toml";

/// Environment variable naming an explicit config file
pub const CONFIG_ENV: &str = "BOOKMARKS_MANAGER_CONFIG";

/// Places searched for the config file, in priority order
///
/// 1. `$BOOKMARKS_MANAGER_CONFIG`
/// 2. `.bookmarks-manager.toml` in the current directory
/// 3. `.bookmarks-manager.toml` in the home directory
pub fn config_file_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Some(explicit) = std::env::var_os(CONFIG_ENV) {
        candidates.push(PathBuf::from(explicit));
    }
    candidates.push(PathBuf::from(CONFIG_FILE));
    if let Some(home) = dirs::home_dir() {
        candidates.push(home.join(CONFIG_FILE));
    }
    candidates
}

/// Path and content of the first readable config file, if any
pub fn load_config_file() -> Option<(PathBuf, String)> {
    config_file_candidates().into_iter().find_map(|path| {
        let content = std::fs::read_to_string(&path).ok()?;
        Some((path, content))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_file_precedes_home() {
        let candidates = config_file_candidates();
        let local = candidates
            .iter()
            .position(|path| path == &PathBuf::from(CONFIG_FILE))
            .unwrap();

        assert!(candidates[local + 1..]
            .iter()
            .all(|path| path.ends_with(CONFIG_FILE) && path.is_absolute()));
    }
}
