//! Bookmark Nodes
//!
//! The bookmark tree is stored flat: every node keyed by id, folders holding
//! the ordered ids of their children.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

pub type NodeId = String;

pub type NodeMap = HashMap<NodeId, BookmarkNode>;

/// Id of the invisible root holding the top-level folders
pub const ROOT_NODE_ID: &str = "0";

/// A bookmark or a folder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkNode {
    pub id: NodeId,
    pub parent_id: Option<NodeId>,
    /// Position within the parent's children
    pub index: usize,
    pub title: String,
    /// Set for bookmarks, `None` for folders
    pub url: Option<String>,
    pub date_added: Option<DateTime<Utc>>,
    /// Set for folders, `None` for bookmarks
    pub children: Option<Vec<NodeId>>,
}

impl BookmarkNode {
    pub fn folder(id: impl Into<NodeId>, parent_id: Option<NodeId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            parent_id,
            index: 0,
            title: title.into(),
            url: None,
            date_added: None,
            children: Some(Vec::new()),
        }
    }

    pub fn bookmark(
        id: impl Into<NodeId>,
        parent_id: Option<NodeId>,
        title: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            parent_id,
            index: 0,
            title: title.into(),
            url: Some(url.into()),
            date_added: None,
            children: None,
        }
    }

    pub fn is_folder(&self) -> bool {
        self.url.is_none()
    }

    pub fn child_ids(&self) -> &[NodeId] {
        self.children.as_deref().unwrap_or(&[])
    }
}

/// `id` and every node below it. Unknown ids yield an empty set.
pub fn descendants(nodes: &NodeMap, id: &str) -> HashSet<NodeId> {
    let mut found = HashSet::new();
    let mut stack = vec![id.to_string()];

    while let Some(current) = stack.pop() {
        let Some(node) = nodes.get(&current) else {
            continue;
        };
        stack.extend(node.child_ids().iter().cloned());
        found.insert(current);
    }

    found
}

/// Whether `ancestor` is `id` itself or one of its parents
pub fn is_ancestor_of(nodes: &NodeMap, ancestor: &str, id: &str) -> bool {
    let mut current = Some(id);
    while let Some(current_id) = current {
        if current_id == ancestor {
            return true;
        }
        current = nodes.get(current_id).and_then(|node| node.parent_id.as_deref());
    }
    false
}

/// Whether `id` is the root or one of the top-level folders, which cannot be
/// moved, renamed or removed
pub fn is_permanent(nodes: &NodeMap, id: &str) -> bool {
    id == ROOT_NODE_ID
        || nodes
            .get(id)
            .is_some_and(|node| node.parent_id.as_deref() == Some(ROOT_NODE_ID))
}

/// Number of edges between the root and `id`
pub fn depth(nodes: &NodeMap, id: &str) -> usize {
    let mut depth = 0;
    let mut current = nodes.get(id).and_then(|node| node.parent_id.as_deref());
    while let Some(parent) = current {
        depth += 1;
        current = nodes.get(parent).and_then(|node| node.parent_id.as_deref());
    }
    depth
}

/// Next free numeric id
pub fn next_node_id(nodes: &NodeMap) -> NodeId {
    let max = nodes
        .keys()
        .filter_map(|id| id.parse::<u64>().ok())
        .max()
        .unwrap_or(0);
    (max + 1).to_string()
}

/// Rewrite `index` of every child of `parent_id` to match its position
pub fn reindex_children(nodes: &mut NodeMap, parent_id: &str) {
    let Some(children) = nodes.get(parent_id).map(|parent| parent.child_ids().to_vec()) else {
        return;
    };
    for (index, child_id) in children.iter().enumerate() {
        if let Some(child) = nodes.get_mut(child_id) {
            child.index = index;
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// ```text
    /// 0
    /// ├── 1 Bookmarks bar
    /// │   ├── 3 Work
    /// │   │   ├── 5 Tracker (bookmark)
    /// │   │   └── 6 Archive
    /// │   └── 4 Rust (bookmark)
    /// └── 2 Other bookmarks
    ///     └── 7 News (bookmark)
    /// ```
    pub fn sample_nodes() -> NodeMap {
        let mut nodes = NodeMap::new();
        let mut add = |mut node: BookmarkNode, children: &[&str]| {
            if node.is_folder() {
                node.children = Some(children.iter().map(|c| c.to_string()).collect());
            }
            nodes.insert(node.id.clone(), node);
        };
        let parent = |id: &str| Some(id.to_string());

        add(BookmarkNode::folder("0", None, ""), &["1", "2"]);
        add(BookmarkNode::folder("1", parent("0"), "Bookmarks bar"), &["3", "4"]);
        add(BookmarkNode::folder("2", parent("0"), "Other bookmarks"), &["7"]);
        add(BookmarkNode::folder("3", parent("1"), "Work"), &["5", "6"]);
        add(BookmarkNode::bookmark("4", parent("1"), "Rust", "https://www.rust-lang.org"), &[]);
        add(BookmarkNode::bookmark("5", parent("3"), "Tracker", "https://tracker.example.com"), &[]);
        add(BookmarkNode::folder("6", parent("3"), "Archive"), &[]);
        add(BookmarkNode::bookmark("7", parent("2"), "News", "https://news.example.com"), &[]);

        for id in ["0", "1", "2", "3", "6"] {
            reindex_children(&mut nodes, id);
        }
        nodes
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::sample_nodes;
    use super::*;

    #[test]
    fn test_descendants_include_self_and_subtree() {
        let nodes = sample_nodes();
        let found = descendants(&nodes, "3");
        let expected: HashSet<NodeId> = ["3", "5", "6"].iter().map(|s| s.to_string()).collect();
        assert_eq!(found, expected);
    }

    #[test]
    fn test_descendants_of_unknown_is_empty() {
        assert!(descendants(&sample_nodes(), "99").is_empty());
    }

    #[test]
    fn test_is_ancestor_of() {
        let nodes = sample_nodes();
        assert!(is_ancestor_of(&nodes, "1", "5"));
        assert!(is_ancestor_of(&nodes, "5", "5"));
        assert!(!is_ancestor_of(&nodes, "2", "5"));
        assert!(!is_ancestor_of(&nodes, "5", "1"));
    }

    #[test]
    fn test_is_permanent() {
        let nodes = sample_nodes();
        assert!(is_permanent(&nodes, ROOT_NODE_ID));
        assert!(is_permanent(&nodes, "1"));
        assert!(is_permanent(&nodes, "2"));
        assert!(!is_permanent(&nodes, "3"));
        assert!(!is_permanent(&nodes, "99"));
    }

    #[test]
    fn test_depth() {
        let nodes = sample_nodes();
        assert_eq!(depth(&nodes, "0"), 0);
        assert_eq!(depth(&nodes, "1"), 1);
        assert_eq!(depth(&nodes, "6"), 3);
    }

    #[test]
    fn test_next_node_id() {
        assert_eq!(next_node_id(&sample_nodes()), "8");
        assert_eq!(next_node_id(&NodeMap::new()), "1");
    }

    #[test]
    fn test_sample_indices() {
        let nodes = sample_nodes();
        assert_eq!(nodes["4"].index, 1);
        assert_eq!(nodes["6"].index, 1);
    }
}
