use bookmarks_store::Reducer;

use crate::actions::Action;
use crate::reducers::{
    folder_open_reducer, nodes_reducer, prefs_reducer, search_reducer, selected_folder_reducer,
    selection_reducer,
};
use crate::state::BookmarksState;

/// Root reducer - pure function producing new state from current state + action
///
/// Every slice reducer sees the node map as it was before the action, so a
/// removal can still look up the ancestry of the removed nodes.
pub fn reduce(state: BookmarksState, action: &Action) -> BookmarksState {
    let BookmarksState {
        nodes,
        selected_folder,
        folder_open,
        prefs,
        search,
        selection,
    } = state;

    let selected_folder = selected_folder_reducer::reduce(selected_folder, action, &nodes);
    let folder_open = folder_open_reducer::reduce(folder_open, action, &nodes);
    let prefs = prefs_reducer::reduce(prefs, action);
    let search = search_reducer::reduce(search, action);
    let selection = selection_reducer::reduce(selection, action);
    let nodes = nodes_reducer::reduce(nodes, action);

    BookmarksState {
        nodes,
        selected_folder,
        folder_open,
        prefs,
        search,
        selection,
    }
}

/// [`Reducer`] for the bookmarks page
#[derive(Debug, Clone, Copy, Default)]
pub struct BookmarksReducer;

impl Reducer for BookmarksReducer {
    type State = BookmarksState;
    type Action = Action;

    fn reduce(&self, state: BookmarksState, action: &Action) -> BookmarksState {
        reduce(state, action)
    }
}
