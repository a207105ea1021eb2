//! Dispatching actions into a store
//!
//! Two paths lead to the reducer:
//! - [`DispatchContext`] is handed to a deferred action while it runs and
//!   applies actions synchronously.
//! - [`Dispatcher`] is a cloneable channel sender for delivering actions
//!   later, from another task or from an observer. Actions sent through it
//!   are applied when the store drains its pending channel.

use tokio::sync::mpsc;

/// A unit of work that produces zero or more actions through a [`DispatchContext`].
pub type DeferredAction<A> = Box<dyn for<'a, 'b> FnOnce(&'a mut DispatchContext<'b, A>) + Send>;

/// Dispatcher for sending actions back to the store
///
/// Actions are queued on an unbounded channel and applied in the order they
/// were sent, the next time the store drains it.
#[derive(Debug)]
pub struct Dispatcher<A> {
    tx: mpsc::UnboundedSender<A>,
}

impl<A> Clone for Dispatcher<A> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<A> Dispatcher<A> {
    /// Create a new dispatcher
    pub fn new(tx: mpsc::UnboundedSender<A>) -> Self {
        Self { tx }
    }

    /// Dispatch an action
    ///
    /// `None` is ignored. If the store has been dropped the action is lost
    /// and an error is logged.
    pub fn dispatch(&self, action: impl Into<Option<A>>) {
        let Some(action) = action.into() else {
            return;
        };
        if let Err(e) = self.tx.send(action) {
            log::error!("Failed to dispatch action: {}", e);
        }
    }

    /// Whether the receiving store is gone
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// The `dispatch` callback a deferred action receives.
pub struct DispatchContext<'a, A> {
    sink: &'a mut dyn FnMut(Option<A>),
    dispatcher: &'a Dispatcher<A>,
}

impl<'a, A> DispatchContext<'a, A> {
    pub(crate) fn new(sink: &'a mut dyn FnMut(Option<A>), dispatcher: &'a Dispatcher<A>) -> Self {
        Self { sink, dispatcher }
    }

    /// Reduce an action right now. May be called any number of times.
    pub fn dispatch(&mut self, action: impl Into<Option<A>>) {
        (self.sink)(action.into());
    }

    /// A dispatcher for actions produced after this deferred action returns
    pub fn dispatcher(&self) -> Dispatcher<A> {
        self.dispatcher.clone()
    }
}
