//! Folder Open State

use std::collections::HashMap;

use super::nodes::{depth, NodeId, NodeMap};

/// Folders up to this depth are open unless explicitly closed
pub const FOLDER_OPEN_BY_DEFAULT_DEPTH: usize = 1;

/// Explicit open/closed overrides for folders in the sidebar tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderOpenState {
    pub overrides: HashMap<NodeId, bool>,
    pub open_depth: usize,
}

impl Default for FolderOpenState {
    fn default() -> Self {
        Self {
            overrides: HashMap::new(),
            open_depth: FOLDER_OPEN_BY_DEFAULT_DEPTH,
        }
    }
}

impl FolderOpenState {
    pub fn with_open_depth(open_depth: usize) -> Self {
        Self {
            open_depth,
            ..Self::default()
        }
    }

    pub fn is_open(&self, id: &str, nodes: &NodeMap) -> bool {
        self.overrides
            .get(id)
            .copied()
            .unwrap_or_else(|| depth(nodes, id) <= self.open_depth)
    }
}
