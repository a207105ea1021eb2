//! Bookmarks Page State

use super::{
    FolderOpenState, NodeId, NodeMap, PreferencesState, SearchState, SelectionState, ROOT_NODE_ID,
};

/// The whole state tree of the bookmarks page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookmarksState {
    pub nodes: NodeMap,
    /// Folder whose children are listed when no search is showing
    pub selected_folder: NodeId,
    pub folder_open: FolderOpenState,
    pub prefs: PreferencesState,
    pub search: SearchState,
    pub selection: SelectionState,
}

impl BookmarksState {
    /// Fresh state for `nodes`, showing the first top-level folder
    pub fn with_nodes(nodes: NodeMap) -> Self {
        let selected_folder = first_top_level_folder(&nodes).unwrap_or_else(|| ROOT_NODE_ID.to_string());
        Self {
            nodes,
            selected_folder,
            ..Self::default()
        }
    }

    pub fn is_showing_search(&self) -> bool {
        self.search.results.is_some()
    }

    /// Ids listed in the main pane: search results, or the selected folder's children
    pub fn displayed_list(&self) -> &[NodeId] {
        if let Some(results) = &self.search.results {
            return results;
        }
        self.nodes
            .get(&self.selected_folder)
            .map(|folder| folder.child_ids())
            .unwrap_or(&[])
    }

    pub fn is_folder_open(&self, id: &str) -> bool {
        self.folder_open.is_open(id, &self.nodes)
    }
}

/// First folder under the root, if any
pub(crate) fn first_top_level_folder(nodes: &NodeMap) -> Option<NodeId> {
    nodes
        .get(ROOT_NODE_ID)?
        .child_ids()
        .iter()
        .find(|id| nodes.get(*id).is_some_and(|node| node.is_folder()))
        .cloned()
}
