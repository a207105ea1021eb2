//! Bookmarks manager
//!
//! A bookmarks page whose whole state lives in a [`bookmarks_store::Store`]:
//! shell commands become actions, reducers compute the next state, and
//! observers render it and persist folder state.

pub mod actions;
pub mod app;
pub mod commands;
pub mod logger;
pub mod observers;
pub mod reducers;
pub mod search;
pub mod state;
pub mod tree;

pub use app::{App, AppError, BookmarksStore, Flow};
