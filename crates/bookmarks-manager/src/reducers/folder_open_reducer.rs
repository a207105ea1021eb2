use crate::actions::Action;
use crate::state::{FolderOpenState, NodeMap};

/// Reducer for folder open/closed overrides
///
/// `nodes` is the node map before this action was applied.
pub fn reduce(mut state: FolderOpenState, action: &Action, nodes: &NodeMap) -> FolderOpenState {
    match action {
        Action::ChangeFolderOpen { id, open } => {
            state.overrides.insert(id.clone(), *open);
        }
        Action::SelectFolder(id) => {
            if let Some(parent_id) = nodes.get(id).and_then(|node| node.parent_id.as_deref()) {
                open_folder_and_ancestors(&mut state, parent_id, nodes);
            }
        }
        Action::MoveBookmark { id, parent_id, .. } => {
            // A moved folder stays visible in the sidebar
            if nodes.get(id).is_some_and(|node| node.is_folder()) {
                open_folder_and_ancestors(&mut state, parent_id, nodes);
            }
        }
        Action::RemoveBookmark { descendants, .. } => {
            state.overrides.retain(|id, _| !descendants.contains(id));
        }
        _ => {}
    }

    state
}

fn open_folder_and_ancestors(state: &mut FolderOpenState, id: &str, nodes: &NodeMap) {
    let mut current = Some(id);
    while let Some(current_id) = current {
        state.overrides.insert(current_id.to_string(), true);
        current = nodes.get(current_id).and_then(|node| node.parent_id.as_deref());
    }
}
