//! Bookmark tree files
//!
//! Bookmarks are stored on disk as a nested JSON tree and flattened into a
//! [`NodeMap`] for the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::state::{BookmarkNode, NodeId, NodeMap, ROOT_NODE_ID};

#[derive(Debug, Error)]
pub enum TreeError {
    #[error("Failed to access bookmarks file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid bookmarks JSON in {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Duplicate bookmark id: {0}")]
    DuplicateId(NodeId),

    #[error("Root node must have id \"0\" and no url")]
    InvalidRoot,

    #[error("Node {0} is missing from the node map")]
    MissingNode(NodeId),
}

/// A node as stored in the bookmarks file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkTreeNode {
    pub id: NodeId,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_added: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<BookmarkTreeNode>>,
}

impl BookmarkTreeNode {
    fn folder(id: &str, title: &str, children: Vec<BookmarkTreeNode>) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            url: None,
            date_added: None,
            children: Some(children),
        }
    }
}

/// An empty tree with the two standard top-level folders
pub fn default_tree() -> BookmarkTreeNode {
    BookmarkTreeNode::folder(
        ROOT_NODE_ID,
        "",
        vec![
            BookmarkTreeNode::folder("1", "Bookmarks bar", vec![]),
            BookmarkTreeNode::folder("2", "Other bookmarks", vec![]),
        ],
    )
}

pub fn load_tree(path: &Path) -> Result<BookmarkTreeNode, TreeError> {
    let file = File::open(path).map_err(|source| TreeError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let tree: BookmarkTreeNode =
        serde_json::from_reader(BufReader::new(file)).map_err(|source| TreeError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    log::info!("Loaded bookmarks from {:?}", path);
    Ok(tree)
}

pub fn save_tree(path: &Path, tree: &BookmarkTreeNode) -> Result<(), TreeError> {
    let io_error = |source| TreeError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(io_error)?;
    }
    let file = File::create(path).map_err(io_error)?;
    serde_json::to_writer_pretty(BufWriter::new(file), tree).map_err(|source| TreeError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("Saved bookmarks to {:?}", path);
    Ok(())
}

/// Flatten a tree into a node map, assigning parents and indices
pub fn normalize_nodes(root: &BookmarkTreeNode) -> Result<NodeMap, TreeError> {
    if root.id != ROOT_NODE_ID || root.url.is_some() {
        return Err(TreeError::InvalidRoot);
    }

    let mut nodes = NodeMap::new();
    let mut seen = HashSet::new();
    let mut stack: Vec<(&BookmarkTreeNode, Option<NodeId>, usize)> = vec![(root, None, 0)];

    while let Some((tree_node, parent_id, index)) = stack.pop() {
        if !seen.insert(tree_node.id.clone()) {
            return Err(TreeError::DuplicateId(tree_node.id.clone()));
        }

        let children = match (&tree_node.url, &tree_node.children) {
            (Some(_), _) => None,
            (None, children) => Some(
                children
                    .iter()
                    .flatten()
                    .map(|child| child.id.clone())
                    .collect(),
            ),
        };
        for (child_index, child) in tree_node.children.iter().flatten().enumerate() {
            if tree_node.url.is_none() {
                stack.push((child, Some(tree_node.id.clone()), child_index));
            }
        }

        nodes.insert(
            tree_node.id.clone(),
            BookmarkNode {
                id: tree_node.id.clone(),
                parent_id,
                index,
                title: tree_node.title.clone(),
                url: tree_node.url.clone(),
                date_added: tree_node.date_added,
                children,
            },
        );
    }

    Ok(nodes)
}

/// Rebuild the nested tree below `id`
pub fn build_tree(nodes: &NodeMap, id: &str) -> Result<BookmarkTreeNode, TreeError> {
    let node = nodes
        .get(id)
        .ok_or_else(|| TreeError::MissingNode(id.to_string()))?;

    let children = match &node.children {
        Some(child_ids) => Some(
            child_ids
                .iter()
                .map(|child_id| build_tree(nodes, child_id))
                .collect::<Result<Vec<_>, _>>()?,
        ),
        None => None,
    };

    Ok(BookmarkTreeNode {
        id: node.id.clone(),
        title: node.title.clone(),
        url: node.url.clone(),
        date_added: node.date_added,
        children,
    })
}
