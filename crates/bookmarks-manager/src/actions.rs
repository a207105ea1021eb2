//! Actions and action creators
//!
//! Actions describe every state change of the bookmarks page. Creators that
//! need to look at the current state compute derived payloads (descendants of
//! a removed node, the ids of a range selection) so reducers stay simple.
//! Creators return `None` when the requested change makes no sense; the store
//! treats a `None` dispatch as a no-op.

use std::collections::HashSet;

use crate::state::{
    descendants, is_ancestor_of, is_permanent, BookmarkNode, BookmarksState, IncognitoAvailability, NodeId,
    NodeMap, ROOT_NODE_ID,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// ## Node changes
    /// Insert a node at `node.index` of `node.parent_id`
    CreateBookmark(BookmarkNode),
    EditBookmark {
        id: NodeId,
        title: Option<String>,
        url: Option<String>,
    },
    MoveBookmark {
        id: NodeId,
        parent_id: NodeId,
        index: usize,
        old_parent_id: NodeId,
        old_index: usize,
    },
    ReorderChildren {
        id: NodeId,
        children: Vec<NodeId>,
    },
    /// `descendants` includes `id` itself
    RemoveBookmark {
        id: NodeId,
        parent_id: NodeId,
        index: usize,
        descendants: HashSet<NodeId>,
    },
    /// Replace the whole node map
    RefreshNodes(NodeMap),

    /// ## Navigation
    SelectFolder(NodeId),
    ChangeFolderOpen {
        id: NodeId,
        open: bool,
    },

    /// ## Search
    StartSearch(String),
    FinishSearch(Vec<NodeId>),
    ClearSearch,

    /// ## Selection
    DeselectItems,
    SelectItems {
        items: Vec<NodeId>,
        clear: bool,
        toggle: bool,
        anchor: Option<NodeId>,
    },
    UpdateAnchor(NodeId),

    /// ## Preferences
    SetIncognitoAvailability(IncognitoAvailability),
    SetCanEdit(bool),
}

/// How a click on an item changes the selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectItemConfig {
    /// Drop the previous selection first
    pub clear: bool,
    /// Select everything between the anchor and the item
    pub range: bool,
    /// Flip the item instead of adding it
    pub toggle: bool,
}

impl SelectItemConfig {
    /// Plain click
    pub fn replace() -> Self {
        Self {
            clear: true,
            ..Self::default()
        }
    }

    /// Ctrl-click
    pub fn toggle() -> Self {
        Self {
            toggle: true,
            ..Self::default()
        }
    }

    /// Shift-click
    pub fn range() -> Self {
        Self {
            clear: true,
            range: true,
            toggle: false,
        }
    }

    /// Ctrl-shift-click
    pub fn extend_range() -> Self {
        Self {
            range: true,
            ..Self::default()
        }
    }
}

pub fn create_bookmark(node: BookmarkNode) -> Action {
    Action::CreateBookmark(node)
}

pub fn edit_bookmark(id: impl Into<NodeId>, title: Option<String>, url: Option<String>) -> Action {
    Action::EditBookmark {
        id: id.into(),
        title,
        url,
    }
}

pub fn move_bookmark(
    id: impl Into<NodeId>,
    parent_id: impl Into<NodeId>,
    index: usize,
    old_parent_id: impl Into<NodeId>,
    old_index: usize,
) -> Action {
    Action::MoveBookmark {
        id: id.into(),
        parent_id: parent_id.into(),
        index,
        old_parent_id: old_parent_id.into(),
        old_index,
    }
}

/// Move `id` to position `index` of `parent_id`
///
/// `None` when either node is unknown, the moved node is permanent, the
/// target is the root or not a folder, or the target lies inside the moved
/// node.
pub fn move_bookmark_to(nodes: &NodeMap, id: &str, parent_id: &str, index: usize) -> Option<Action> {
    let node = nodes.get(id)?;
    let old_parent_id = node.parent_id.clone()?;
    let target = nodes.get(parent_id)?;
    if is_permanent(nodes, id)
        || parent_id == ROOT_NODE_ID
        || !target.is_folder()
        || is_ancestor_of(nodes, id, parent_id)
    {
        log::warn!("Tried to move {} into invalid parent {}", id, parent_id);
        return None;
    }

    let mut sibling_count = target.child_ids().len();
    if old_parent_id == parent_id {
        sibling_count -= 1;
    }
    Some(move_bookmark(
        id,
        parent_id,
        index.min(sibling_count),
        old_parent_id,
        node.index,
    ))
}

pub fn reorder_children(id: impl Into<NodeId>, children: Vec<NodeId>) -> Action {
    Action::ReorderChildren {
        id: id.into(),
        children,
    }
}

/// Sort the children of folder `id`: folders first, then by title and url
///
/// `None` for unknown ids and bookmarks.
pub fn sort_children(id: &str, nodes: &NodeMap) -> Option<Action> {
    let folder = nodes.get(id).filter(|node| node.is_folder())?;
    let mut children: Vec<&BookmarkNode> = folder
        .child_ids()
        .iter()
        .filter_map(|child| nodes.get(child))
        .collect();
    children.sort_by_cached_key(|node| {
        (
            !node.is_folder(),
            node.title.to_lowercase(),
            node.url.clone().unwrap_or_default(),
        )
    });
    Some(reorder_children(
        id,
        children.into_iter().map(|node| node.id.clone()).collect(),
    ))
}

/// Remove `id` and everything below it. `None` for permanent or unknown ids.
pub fn remove_bookmark(id: &str, nodes: &NodeMap) -> Option<Action> {
    let node = nodes.get(id)?;
    let parent_id = node.parent_id.clone()?;
    if is_permanent(nodes, id) {
        log::warn!("Tried to remove permanent node {}", id);
        return None;
    }
    Some(Action::RemoveBookmark {
        id: id.to_string(),
        parent_id,
        index: node.index,
        descendants: descendants(nodes, id),
    })
}

pub fn refresh_nodes(nodes: NodeMap) -> Action {
    Action::RefreshNodes(nodes)
}

/// Show the children of folder `id`
///
/// `None` for the root, unknown ids and bookmarks.
pub fn select_folder(id: &str, nodes: &NodeMap) -> Option<Action> {
    let valid = id != ROOT_NODE_ID && nodes.get(id).is_some_and(|node| node.is_folder());
    if !valid {
        log::warn!("Tried to select invalid folder: {}", id);
        return None;
    }
    Some(Action::SelectFolder(id.to_string()))
}

pub fn change_folder_open(id: impl Into<NodeId>, open: bool) -> Action {
    Action::ChangeFolderOpen { id: id.into(), open }
}

pub fn clear_search() -> Action {
    Action::ClearSearch
}

pub fn deselect_items() -> Action {
    Action::DeselectItems
}

/// Select `id` in the displayed list according to `config`
///
/// A range runs from the current anchor to `id` and keeps the anchor. When
/// the anchor is not displayed, the range collapses onto `id`.
pub fn select_item(id: &str, state: &BookmarksState, config: SelectItemConfig) -> Action {
    debug_assert!(!config.toggle || !config.range);
    debug_assert!(!config.toggle || !config.clear);

    let mut items = Vec::new();
    let mut anchor = id.to_string();

    match (&state.selection.anchor, config.range) {
        (Some(current_anchor), true) => {
            let displayed = state.displayed_list();
            let selected_index = displayed.iter().position(|item| item == id);
            let anchor_index = displayed
                .iter()
                .position(|item| item == current_anchor)
                .or(selected_index);

            match (anchor_index, selected_index) {
                (Some(anchor_index), Some(selected_index)) => {
                    anchor = displayed[anchor_index].clone();
                    let start = anchor_index.min(selected_index);
                    let end = anchor_index.max(selected_index);
                    items.extend(displayed[start..=end].iter().cloned());
                }
                _ => items.push(id.to_string()),
            }
        }
        _ => items.push(id.to_string()),
    }

    Action::SelectItems {
        items,
        clear: config.clear,
        toggle: config.toggle,
        anchor: Some(anchor),
    }
}

/// Replace the selection with `ids`, keeping the current anchor unless one is given
pub fn select_all(ids: Vec<NodeId>, state: &BookmarksState, anchor: Option<NodeId>) -> Action {
    Action::SelectItems {
        items: ids,
        clear: true,
        toggle: false,
        anchor: anchor.or_else(|| state.selection.anchor.clone()),
    }
}

pub fn update_anchor(id: impl Into<NodeId>) -> Action {
    Action::UpdateAnchor(id.into())
}

/// An empty term clears the search
pub fn set_search_term(term: &str) -> Action {
    if term.is_empty() {
        return clear_search();
    }
    Action::StartSearch(term.to_string())
}

pub fn set_search_results(ids: Vec<NodeId>) -> Action {
    Action::FinishSearch(ids)
}

pub fn set_incognito_availability(availability: IncognitoAvailability) -> Action {
    Action::SetIncognitoAvailability(availability)
}

pub fn set_can_edit(can_edit: bool) -> Action {
    Action::SetCanEdit(can_edit)
}
