//! Bookmarks Manager Application
//!
//! Owns the store and turns shell commands into actions.

use std::path::{Path, PathBuf};

use bookmarks_config::AppConfig;
use bookmarks_store::{LoggingReducer, Observer, ObserverId, Store, StoreError};
use chrono::Utc;
use thiserror::Error;

use crate::actions::{
    change_folder_open, clear_search, create_bookmark, deselect_items, edit_bookmark,
    move_bookmark_to, refresh_nodes, remove_bookmark, select_all, select_folder, select_item,
    set_can_edit, set_incognito_availability, sort_children, update_anchor, SelectItemConfig,
};
use crate::commands::{Command, CommandError, PickMode, HELP};
use crate::observers::render;
use crate::reducers::BookmarksReducer;
use crate::search::search_action;
use crate::state::{
    is_permanent, next_node_id, BookmarkNode, BookmarksState, FolderOpenState, NodeId, NodeMap,
    ROOT_NODE_ID,
};
use crate::tree::{build_tree, load_tree, normalize_nodes, save_tree, BookmarkTreeNode, TreeError};

pub type BookmarksStore = Store<LoggingReducer<BookmarksReducer>>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Bookmarks are read-only")]
    ReadOnly,

    #[error("No bookmark with id {0}")]
    UnknownNode(NodeId),

    #[error("{0} is not a folder")]
    NotAFolder(NodeId),

    #[error("{0} is not a bookmark")]
    NotABookmark(NodeId),

    #[error("{0} is not listed")]
    NotDisplayed(NodeId),

    #[error("Cannot move {id} into {parent}")]
    InvalidMove { id: NodeId, parent: NodeId },

    #[error("{0} cannot be changed")]
    Protected(NodeId),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Tree(#[from] TreeError),

    #[error(transparent)]
    Command(#[from] CommandError),
}

/// What the shell should do after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Message(String),
    Quit,
}

pub struct App {
    store: BookmarksStore,
    config: AppConfig,
    tree_path: PathBuf,
}

impl App {
    /// Create the application around an uninitialized store
    ///
    /// Preferences are dispatched right away; the store holds them until
    /// [`start`](App::start) provides the bookmarks.
    pub fn new(config: AppConfig, tree_path: PathBuf) -> Self {
        let mut store = Store::new(
            LoggingReducer::new(BookmarksReducer),
            BookmarksState::default(),
        );
        store.dispatch(set_can_edit(config.can_edit));
        store.dispatch(set_incognito_availability(config.incognito));

        Self {
            store,
            config,
            tree_path,
        }
    }

    pub fn add_observer(&mut self, observer: impl Observer<BookmarksState> + 'static) -> ObserverId {
        self.store.add_observer(observer)
    }

    /// Initialize the store with `tree` and persisted folder overrides
    pub fn start(
        &mut self,
        tree: &BookmarkTreeNode,
        folder_overrides: impl IntoIterator<Item = (NodeId, bool)>,
    ) -> Result<(), AppError> {
        let nodes = normalize_nodes(tree)?;
        let mut state = BookmarksState::with_nodes(nodes);
        state.folder_open = FolderOpenState::with_open_depth(self.config.open_depth);
        state.folder_open.overrides = folder_overrides
            .into_iter()
            .filter(|(id, _)| state.nodes.get(id).is_some_and(|node| node.is_folder()))
            .collect();

        log::info!(
            "Starting with {} nodes, {} queued actions",
            state.nodes.len(),
            self.store.queued_len()
        );
        self.store.init(state)?;
        Ok(())
    }

    pub fn state(&self) -> &BookmarksState {
        self.store.data()
    }

    pub fn tree_path(&self) -> &Path {
        &self.tree_path
    }

    /// Parse and execute one shell line
    pub fn execute_line(&mut self, line: &str) -> Result<Flow, AppError> {
        let command: Command = line.parse()?;
        self.execute(command)
    }

    pub fn execute(&mut self, command: Command) -> Result<Flow, AppError> {
        log::debug!("Command: {:?}", command);
        self.store.process_pending();

        match command {
            Command::Show => {
                return Ok(Flow::Message(render(self.state(), self.config.show_urls)));
            }
            Command::Select(id) => {
                self.require_folder(&id)?;
                let action = select_folder(&id, self.nodes());
                if action.is_none() {
                    return Err(AppError::Protected(id));
                }
                self.store.dispatch(action);
            }
            Command::Open(id) | Command::Close(id) if id == ROOT_NODE_ID => {
                return Err(AppError::Protected(id));
            }
            Command::Open(id) => {
                self.require_folder(&id)?;
                self.store.dispatch(change_folder_open(id, true));
            }
            Command::Close(id) => {
                self.require_folder(&id)?;
                self.store.dispatch(change_folder_open(id, false));
            }
            Command::Search(term) => {
                let nodes = self.nodes().clone();
                self.store.dispatch_async(search_action(term, nodes));
            }
            Command::Clear => self.store.dispatch(clear_search()),
            Command::Pick { id, mode } => {
                if !self.state().displayed_list().contains(&id) {
                    return Err(AppError::NotDisplayed(id));
                }
                let config = match mode {
                    PickMode::Replace => SelectItemConfig::replace(),
                    PickMode::Toggle => SelectItemConfig::toggle(),
                    PickMode::Range => SelectItemConfig::range(),
                    PickMode::Extend => SelectItemConfig::extend_range(),
                };
                let action = select_item(&id, self.state(), config);
                self.store.dispatch(action);
            }
            Command::All => {
                let state = self.state();
                let action = select_all(state.displayed_list().to_vec(), state, None);
                self.store.dispatch(action);
            }
            Command::Deselect => self.store.dispatch(deselect_items()),
            Command::Add { parent, url, title } => return self.add(parent, url, title),
            Command::Edit { id, title } => {
                self.require_editable(&id)?;
                self.store.dispatch(edit_bookmark(id, Some(title), None));
            }
            Command::Url { id, url } => {
                self.require_editable(&id)?;
                if self.nodes()[&id].is_folder() {
                    return Err(AppError::NotABookmark(id));
                }
                self.store.dispatch(edit_bookmark(id, None, Some(url)));
            }
            Command::Move { id, parent, index } => {
                self.require_editable(&id)?;
                self.require_folder(&parent)?;
                if parent == ROOT_NODE_ID {
                    return Err(AppError::Protected(parent));
                }
                let Some(action) = move_bookmark_to(self.nodes(), &id, &parent, index) else {
                    return Err(AppError::InvalidMove { id, parent });
                };
                self.store.dispatch(action);
            }
            Command::Remove(Some(id)) => {
                self.require_editable(&id)?;
                let action = remove_bookmark(&id, self.nodes());
                self.store.dispatch(action);
            }
            Command::Remove(None) => return self.remove_selection(),
            Command::Sort(id) => {
                self.require_can_edit()?;
                self.require_folder(&id)?;
                if id == ROOT_NODE_ID {
                    return Err(AppError::Protected(id));
                }
                let action = sort_children(&id, self.nodes());
                self.store.dispatch(action);
            }
            Command::Anchor(id) => {
                if !self.state().displayed_list().contains(&id) {
                    return Err(AppError::NotDisplayed(id));
                }
                self.store.dispatch(update_anchor(id));
            }
            Command::Reload => return self.reload(),
            Command::Batch => self.store.begin_batch_update(),
            Command::End => self.store.end_batch_update()?,
            Command::Save => return self.save(),
            Command::Help => return Ok(Flow::Message(HELP.to_string())),
            Command::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }

    fn add(&mut self, parent: NodeId, url: Option<String>, title: String) -> Result<Flow, AppError> {
        self.require_can_edit()?;
        self.require_folder(&parent)?;
        if parent == ROOT_NODE_ID {
            return Err(AppError::Protected(parent));
        }

        let id = next_node_id(self.nodes());
        let mut node = match url {
            Some(url) => BookmarkNode::bookmark(id.clone(), Some(parent.clone()), title, url),
            None => BookmarkNode::folder(id.clone(), Some(parent.clone()), title),
        };
        node.index = self.nodes()[&parent].child_ids().len();
        node.date_added = Some(Utc::now());

        self.store.dispatch(create_bookmark(node));
        Ok(Flow::Message(format!("Added {}", id)))
    }

    /// Remove every selected item in one update
    fn remove_selection(&mut self) -> Result<Flow, AppError> {
        self.require_can_edit()?;
        let mut ids: Vec<NodeId> = self.state().selection.items.iter().cloned().collect();
        if ids.is_empty() {
            return Ok(Flow::Message("Nothing selected".to_string()));
        }
        ids.sort();
        if let Some(id) = ids.iter().find(|id| is_permanent(self.nodes(), id)) {
            return Err(AppError::Protected(id.clone()));
        }

        let removed = self.store.batch_update(|store| {
            let mut removed = 0;
            for id in &ids {
                // Already gone when an ancestor was selected too
                if let Some(action) = remove_bookmark(id, &store.data().nodes) {
                    store.dispatch(action);
                    removed += 1;
                }
            }
            removed
        });

        Ok(Flow::Message(format!("Removed {} items", removed)))
    }

    /// Replace every node with the bookmarks file's content
    ///
    /// The selection and search refer to the old nodes and are dropped in
    /// the same update.
    fn reload(&mut self) -> Result<Flow, AppError> {
        let nodes = normalize_nodes(&load_tree(&self.tree_path)?)?;
        let count = nodes.len();
        self.store.batch_update(|store| {
            store.dispatch(refresh_nodes(nodes));
            store.dispatch(clear_search());
            store.dispatch(deselect_items());
        });
        Ok(Flow::Message(format!(
            "Reloaded {} nodes from {}",
            count,
            self.tree_path.display()
        )))
    }

    fn save(&self) -> Result<Flow, AppError> {
        let tree = build_tree(self.nodes(), ROOT_NODE_ID)?;
        save_tree(&self.tree_path, &tree)?;
        Ok(Flow::Message(format!("Saved to {}", self.tree_path.display())))
    }

    fn nodes(&self) -> &NodeMap {
        &self.state().nodes
    }

    fn require_can_edit(&self) -> Result<(), AppError> {
        if !self.state().prefs.can_edit {
            return Err(AppError::ReadOnly);
        }
        Ok(())
    }

    fn require_folder(&self, id: &str) -> Result<(), AppError> {
        match self.nodes().get(id) {
            None => Err(AppError::UnknownNode(id.to_string())),
            Some(node) if !node.is_folder() => Err(AppError::NotAFolder(id.to_string())),
            Some(_) => Ok(()),
        }
    }

    /// Existing node below the top-level folders while editing is allowed
    fn require_editable(&self, id: &str) -> Result<(), AppError> {
        self.require_can_edit()?;
        if id != ROOT_NODE_ID && !self.nodes().contains_key(id) {
            return Err(AppError::UnknownNode(id.to_string()));
        }
        self.require_not_permanent(id)
    }

    fn require_not_permanent(&self, id: &str) -> Result<(), AppError> {
        if is_permanent(self.nodes(), id) {
            return Err(AppError::Protected(id.to_string()));
        }
        Ok(())
    }
}
