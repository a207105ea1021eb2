//! Bookmarks Page State Module
//!
//! Contains all state types held by the store, organized by slice.

mod app;
mod folder_open;
mod nodes;
mod prefs;
mod search;
mod selection;

pub use app::BookmarksState;
pub(crate) use app::first_top_level_folder;
pub use folder_open::{FolderOpenState, FOLDER_OPEN_BY_DEFAULT_DEPTH};
pub use nodes::{
    depth, descendants, is_ancestor_of, is_permanent, next_node_id, reindex_children, BookmarkNode, NodeId,
    NodeMap, ROOT_NODE_ID,
};
pub use prefs::{IncognitoAvailability, PreferencesState};
pub use search::SearchState;
pub use selection::SelectionState;

#[cfg(test)]
pub(crate) use nodes::fixtures;
