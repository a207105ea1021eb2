//! Store Observers
//!
//! Observers react to state changes after the store has applied them:
//! rendering the page and persisting folder state.

mod display_observer;
mod folder_state_observer;

pub use display_observer::{render, DisplayObserver};
pub use folder_state_observer::FolderStatePersister;
