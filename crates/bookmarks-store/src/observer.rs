//! Observers receive the full state after every applied change

use std::fmt;

/// Callback invoked with the new state after the store applies a change.
///
/// Observers must not assume any ordering relative to each other.
pub trait Observer<S>: Send {
    fn on_state_changed(&mut self, state: &S);
}

impl<S, F> Observer<S> for F
where
    F: FnMut(&S) + Send,
{
    fn on_state_changed(&mut self, state: &S) {
        self(state)
    }
}

/// Handle identifying a registered observer, used for removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(pub(crate) u64);

impl fmt::Display for ObserverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "observer#{}", self.0)
    }
}
