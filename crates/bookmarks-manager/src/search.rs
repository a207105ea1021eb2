//! Bookmark search
//!
//! Searching runs as a deferred action: it marks the search as started,
//! computes the matches, then delivers them as a second action.

use bookmarks_store::DispatchContext;

use crate::actions::{set_search_results, set_search_term, Action};
use crate::state::{NodeId, NodeMap, ROOT_NODE_ID};

/// Ids of nodes whose title or url contains every word of `term`, case-insensitively
///
/// Results are ordered by id so repeated searches list items stably.
pub fn search_nodes(nodes: &NodeMap, term: &str) -> Vec<NodeId> {
    let words: Vec<String> = term.split_whitespace().map(str::to_lowercase).collect();
    if words.is_empty() {
        return Vec::new();
    }

    let mut results: Vec<NodeId> = nodes
        .values()
        .filter(|node| node.id != ROOT_NODE_ID)
        .filter(|node| {
            let title = node.title.to_lowercase();
            let url = node.url.as_deref().unwrap_or_default().to_lowercase();
            words
                .iter()
                .all(|word| title.contains(word.as_str()) || url.contains(word.as_str()))
        })
        .map(|node| node.id.clone())
        .collect();

    results.sort_by(|a, b| match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(a), Ok(b)) => a.cmp(&b),
        _ => a.cmp(b),
    });
    results
}

/// Deferred action searching `nodes` for `term`
///
/// An empty term clears the search without producing results.
pub fn search_action(
    term: String,
    nodes: NodeMap,
) -> impl FnOnce(&mut DispatchContext<'_, Action>) + Send + 'static {
    move |ctx: &mut DispatchContext<'_, Action>| {
        let start = set_search_term(&term);
        let cleared = start == Action::ClearSearch;
        ctx.dispatch(start);
        if cleared {
            return;
        }

        let results = search_nodes(&nodes, &term);
        log::debug!("Search {:?} matched {} nodes", term, results.len());
        ctx.dispatch(set_search_results(results));
    }
}
