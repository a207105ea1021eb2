use crate::actions::Action;
use crate::state::{reindex_children, BookmarkNode, NodeMap};

/// Reducer for the node map
pub fn reduce(mut nodes: NodeMap, action: &Action) -> NodeMap {
    match action {
        Action::CreateBookmark(node) => create(&mut nodes, node.clone()),
        Action::EditBookmark { id, title, url } => {
            if let Some(node) = nodes.get_mut(id) {
                if let Some(title) = title {
                    node.title = title.clone();
                }
                // Folders never gain a url
                if let (Some(url), false) = (url, node.is_folder()) {
                    node.url = Some(url.clone());
                }
            }
        }
        Action::MoveBookmark {
            id,
            parent_id,
            index,
            old_parent_id,
            ..
        } => {
            if let Some(old_parent) = nodes.get_mut(old_parent_id) {
                if let Some(children) = old_parent.children.as_mut() {
                    children.retain(|child| child != id);
                }
            }
            insert_child(&mut nodes, parent_id, id, *index);
            if let Some(node) = nodes.get_mut(id) {
                node.parent_id = Some(parent_id.clone());
            }
            reindex_children(&mut nodes, old_parent_id);
            reindex_children(&mut nodes, parent_id);
        }
        Action::ReorderChildren { id, children } => {
            if let Some(folder) = nodes.get_mut(id) {
                folder.children = Some(children.clone());
            }
            reindex_children(&mut nodes, id);
        }
        Action::RemoveBookmark {
            id,
            parent_id,
            descendants,
            ..
        } => {
            if let Some(parent) = nodes.get_mut(parent_id) {
                if let Some(children) = parent.children.as_mut() {
                    children.retain(|child| child != id);
                }
            }
            nodes.retain(|node_id, _| !descendants.contains(node_id));
            reindex_children(&mut nodes, parent_id);
        }
        Action::RefreshNodes(new_nodes) => {
            nodes = new_nodes.clone();
        }
        _ => {}
    }

    nodes
}

fn create(nodes: &mut NodeMap, mut node: BookmarkNode) {
    let Some(parent_id) = node.parent_id.clone() else {
        log::warn!("Ignoring created node {} without parent", node.id);
        return;
    };
    if node.is_folder() && node.children.is_none() {
        node.children = Some(Vec::new());
    }
    let id = node.id.clone();
    let index = node.index;
    nodes.insert(id.clone(), node);
    insert_child(nodes, &parent_id, &id, index);
    reindex_children(nodes, &parent_id);
}

fn insert_child(nodes: &mut NodeMap, parent_id: &str, id: &str, index: usize) {
    let Some(children) = nodes.get_mut(parent_id).and_then(|parent| parent.children.as_mut()) else {
        log::warn!("Parent {} of {} is missing or not a folder", parent_id, id);
        return;
    };
    let index = index.min(children.len());
    children.insert(index, id.to_string());
}
