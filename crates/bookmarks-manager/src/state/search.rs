//! Search State

use super::nodes::NodeId;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    pub term: String,
    /// A search was started and its results have not arrived yet
    pub in_progress: bool,
    /// `None` when no search is showing
    pub results: Option<Vec<NodeId>>,
}
