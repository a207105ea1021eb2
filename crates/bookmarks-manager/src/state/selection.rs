//! Selection State

use std::collections::HashSet;

use super::nodes::NodeId;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    pub items: HashSet<NodeId>,
    /// Fixed end of a range selection
    pub anchor: Option<NodeId>,
}

impl SelectionState {
    pub fn contains(&self, id: &str) -> bool {
        self.items.contains(id)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
