use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

use bookmarks_config::FolderStateFile;
use bookmarks_store::Observer;

use crate::state::{BookmarksState, NodeId};

/// Writes folder open/closed overrides to disk whenever they change
///
/// The first notification only records the overrides, since they were just
/// loaded from the same file.
pub struct FolderStatePersister {
    path: PathBuf,
    last_saved: Option<HashMap<NodeId, bool>>,
}

impl FolderStatePersister {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            last_saved: None,
        }
    }
}

impl Observer<BookmarksState> for FolderStatePersister {
    fn on_state_changed(&mut self, state: &BookmarksState) {
        let overrides = &state.folder_open.overrides;
        match &self.last_saved {
            None => {
                self.last_saved = Some(overrides.clone());
                return;
            }
            Some(last) if last == overrides => return,
            Some(_) => {}
        }

        let folders: BTreeMap<String, bool> =
            overrides.iter().map(|(id, open)| (id.clone(), *open)).collect();
        if let Err(e) = FolderStateFile::new(folders).save_to_path(&self.path) {
            log::error!("Failed to save folder state: {:#}", e);
        }
        self.last_saved = Some(overrides.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::fixtures::sample_nodes;
    use std::fs;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("bookmarks-manager-test-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn test_saves_only_on_change() {
        let path = temp_path("persister.toml");
        let _ = fs::remove_file(&path);
        let mut persister = FolderStatePersister::new(path.clone());
        let mut state = BookmarksState::with_nodes(sample_nodes());

        persister.on_state_changed(&state);
        assert!(!path.exists());

        state.folder_open.overrides.insert("3".into(), true);
        persister.on_state_changed(&state);

        let saved = FolderStateFile::load_from_path(&path).unwrap();
        assert_eq!(saved.folders.get("3"), Some(&true));

        fs::remove_file(&path).unwrap();
        persister.on_state_changed(&state);
        assert!(!path.exists());
    }
}
