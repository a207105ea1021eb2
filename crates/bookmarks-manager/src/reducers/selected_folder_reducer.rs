use crate::actions::Action;
use crate::state::{first_top_level_folder, is_ancestor_of, NodeId, NodeMap, ROOT_NODE_ID};

/// Reducer for the selected folder
///
/// `nodes` is the node map before this action was applied.
pub fn reduce(selected_folder: NodeId, action: &Action, nodes: &NodeMap) -> NodeId {
    match action {
        Action::SelectFolder(id) => id.clone(),
        // Closing an ancestor hides the selected folder, so select the ancestor
        Action::ChangeFolderOpen { id, open: false }
            if is_ancestor_of(nodes, id, &selected_folder) =>
        {
            id.clone()
        }
        // Deleting the selected folder (or an ancestor) selects the deleted node's parent
        Action::RemoveBookmark { id, parent_id, .. } if is_ancestor_of(nodes, id, &selected_folder) => {
            parent_id.clone()
        }
        Action::RefreshNodes(new_nodes) => {
            let still_valid = new_nodes
                .get(&selected_folder)
                .is_some_and(|node| node.is_folder());
            if still_valid {
                selected_folder
            } else {
                first_top_level_folder(new_nodes).unwrap_or_else(|| ROOT_NODE_ID.to_string())
            }
        }
        _ => selected_folder,
    }
}
