//! Store errors

use thiserror::Error;

/// Errors returned by [`Store`](crate::Store) and [`StoreHandle`](crate::StoreHandle) operations.
///
/// Reducer failures are not represented here: a panicking reducer unwinds
/// straight through `dispatch`.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    /// `init` was called on a store that is already initialized.
    #[error("store is already initialized")]
    AlreadyInitialized,

    /// `end_batch_update` was called without a matching `begin_batch_update`.
    #[error("no batch update in progress")]
    NoBatchInProgress,

    /// The task owning the store has stopped.
    #[error("store actor has stopped")]
    ActorStopped,
}
