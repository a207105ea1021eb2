//! # bookmarks-store
//!
//! A unidirectional state container: one authoritative state value, every
//! mutation funnelled through a pure [`Reducer`], and registered
//! [`Observer`]s notified after each applied change.
//!
//! ## Lifecycle
//!
//! A [`Store`] starts uninitialized. Actions dispatched before
//! [`Store::init`] are queued; `init` adopts the initial state, applies the
//! queue in FIFO order and notifies observers once. After that every
//! dispatch is applied immediately.
//!
//! ## Batching
//!
//! [`Store::begin_batch_update`] suppresses notifications until the matching
//! [`Store::end_batch_update`], which notifies once with the final state.
//!
//! ## Usage
//!
//! ```rust
//! use bookmarks_store::{reducer_fn, Store};
//!
//! #[derive(Clone, Default)]
//! struct Counter {
//!     n: u32,
//! }
//!
//! enum Action {
//!     Inc,
//! }
//!
//! let reducer = reducer_fn(|mut state: Counter, action: &Action| {
//!     match action {
//!         Action::Inc => state.n += 1,
//!     }
//!     state
//! });
//!
//! let mut store = Store::new(reducer, Counter::default());
//! store.dispatch(Action::Inc);
//! store.init(Counter { n: 10 }).unwrap();
//! assert_eq!(store.data().n, 11);
//! ```
//!
//! For multi-task programs, [`StoreHandle`] confines a store to a tokio task
//! and serialises all access through a channel.

pub mod actor;
pub mod dispatcher;
pub mod error;
pub mod observer;
pub mod reducer;
pub mod store;

pub use actor::StoreHandle;
pub use dispatcher::{DeferredAction, DispatchContext, Dispatcher};
pub use error::StoreError;
pub use observer::{Observer, ObserverId};
pub use reducer::{reducer_fn, FnReducer, LoggingReducer, Reducer};
pub use store::Store;
