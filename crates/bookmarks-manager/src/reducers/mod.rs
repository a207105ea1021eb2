//! Reducers for each slice of the bookmarks state

pub mod app_reducer;
pub mod folder_open_reducer;
pub mod nodes_reducer;
pub mod prefs_reducer;
pub mod search_reducer;
pub mod selected_folder_reducer;
pub mod selection_reducer;

pub use app_reducer::BookmarksReducer;
