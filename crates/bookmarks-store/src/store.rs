use std::collections::VecDeque;

use tokio::sync::mpsc;

use crate::dispatcher::{DeferredAction, DispatchContext, Dispatcher};
use crate::error::StoreError;
use crate::observer::{Observer, ObserverId};
use crate::reducer::Reducer;

type BoxedObserver<S> = Box<dyn Observer<S>>;

/// Store - holds the single authoritative state and serialises every change
///
/// - Actions dispatched before [`init`](Store::init) are queued, not applied
/// - Every change goes through the reducer; the state is replaced wholesale
/// - Observers are notified after each applied change, unless batching
///
/// The store is single-threaded. To share it between tasks, hand it to
/// [`StoreHandle::spawn`](crate::StoreHandle::spawn).
pub struct Store<R: Reducer> {
    reducer: R,
    state: R::State,
    initialized: bool,
    batch_depth: usize,
    queued: VecDeque<DeferredAction<R::Action>>,
    observers: Vec<(ObserverId, BoxedObserver<R::State>)>,
    next_observer_id: u64,
    dispatcher: Dispatcher<R::Action>,
    pending: mpsc::UnboundedReceiver<R::Action>,
}

impl<R> Store<R>
where
    R: Reducer,
    R::State: Clone + 'static,
    R::Action: Send + 'static,
{
    /// Create an uninitialized store holding `default_state`
    pub fn new(reducer: R, default_state: R::State) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            reducer,
            state: default_state,
            initialized: false,
            batch_depth: 0,
            queued: VecDeque::new(),
            observers: Vec::new(),
            next_observer_id: 0,
            dispatcher: Dispatcher::new(tx),
            pending: rx,
        }
    }

    /// Adopt the initial state and apply everything dispatched so far
    ///
    /// Queued actions run in the order they were dispatched, followed by
    /// actions that arrived through the [`Dispatcher`]. Observers are
    /// notified once with the final state.
    pub fn init(&mut self, initial_state: R::State) -> Result<(), StoreError> {
        if self.initialized {
            log::warn!("Ignoring init: store is already initialized");
            return Err(StoreError::AlreadyInitialized);
        }

        self.state = initial_state;

        let queued = std::mem::take(&mut self.queued);
        log::debug!("Initializing store with {} queued actions", queued.len());
        for deferred in queued {
            self.run_deferred(deferred);
        }
        while let Ok(action) = self.pending.try_recv() {
            self.reduce(Some(action));
        }

        self.initialized = true;
        self.notify_observers();
        Ok(())
    }

    /// Dispatch a single action. `None` is a no-op.
    pub fn dispatch(&mut self, action: impl Into<Option<R::Action>>) {
        let action = action.into();
        self.dispatch_async(move |ctx| ctx.dispatch(action));
    }

    /// Run a deferred action, or queue it until `init` when uninitialized
    ///
    /// The closure may dispatch any number of actions through the context;
    /// each one is reduced (and observers notified) before `dispatch`
    /// returns. Use [`DispatchContext::dispatcher`] for actions that arrive
    /// after the closure has returned.
    pub fn dispatch_async<F>(&mut self, deferred: F)
    where
        F: FnOnce(&mut DispatchContext<'_, R::Action>) + Send + 'static,
    {
        self.dispatch_deferred(Box::new(deferred));
    }

    /// Like [`dispatch_async`](Store::dispatch_async) for an already boxed action
    pub fn dispatch_deferred(&mut self, deferred: DeferredAction<R::Action>) {
        if !self.initialized {
            self.queued.push_back(deferred);
            log::trace!("Store not initialized, queued action ({} pending)", self.queued.len());
            return;
        }
        self.run_deferred(deferred);
    }

    fn run_deferred(&mut self, deferred: DeferredAction<R::Action>) {
        let dispatcher = self.dispatcher.clone();
        let mut sink = |action: Option<R::Action>| self.reduce(action);
        let mut ctx = DispatchContext::new(&mut sink, &dispatcher);
        deferred(&mut ctx);
    }

    /// The single write path for the state
    ///
    /// The state is replaced only after the reducer returns, so a panicking
    /// reducer leaves the previous state in place.
    fn reduce(&mut self, action: Option<R::Action>) {
        let Some(action) = action else {
            return;
        };

        self.state = self.reducer.reduce(self.state.clone(), &action);

        if self.initialized && self.batch_depth == 0 {
            self.notify_observers();
        }
    }

    /// Apply actions sent through the [`Dispatcher`] since the last drain
    ///
    /// Does nothing until the store is initialized. Returns the number of
    /// actions applied.
    pub fn process_pending(&mut self) -> usize {
        if !self.initialized {
            return 0;
        }
        let mut applied = 0;
        while let Ok(action) = self.pending.try_recv() {
            self.dispatch(action);
            applied += 1;
        }
        applied
    }

    pub(crate) async fn recv_pending(&mut self) -> Option<R::Action> {
        self.pending.recv().await
    }

    /// Suppress notifications until the matching [`end_batch_update`](Store::end_batch_update)
    ///
    /// Batches nest: only the outermost end notifies.
    pub fn begin_batch_update(&mut self) {
        self.batch_depth += 1;
        log::trace!("Batch update started (depth {})", self.batch_depth);
    }

    /// Close a batch. Closing the outermost batch notifies observers once.
    pub fn end_batch_update(&mut self) -> Result<(), StoreError> {
        if self.batch_depth == 0 {
            log::warn!("end_batch_update called without a batch in progress");
            return Err(StoreError::NoBatchInProgress);
        }
        self.batch_depth -= 1;
        log::trace!("Batch update ended (depth {})", self.batch_depth);

        if self.batch_depth == 0 && self.initialized {
            self.notify_observers();
        }
        Ok(())
    }

    /// Run `f` inside a batch
    pub fn batch_update<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        self.begin_batch_update();
        let result = f(self);
        if let Err(e) = self.end_batch_update() {
            log::warn!("Batch closed inside batch_update: {}", e);
        }
        result
    }

    /// Register an observer. Notification follows insertion order.
    pub fn add_observer<O>(&mut self, observer: O) -> ObserverId
    where
        O: Observer<R::State> + 'static,
    {
        self.add_boxed_observer(Box::new(observer))
    }

    pub(crate) fn add_boxed_observer(&mut self, observer: BoxedObserver<R::State>) -> ObserverId {
        let id = ObserverId(self.next_observer_id);
        self.next_observer_id += 1;
        self.observers.push((id, observer));
        id
    }

    /// Unregister an observer. Unknown ids are ignored and return `false`.
    pub fn remove_observer(&mut self, id: ObserverId) -> bool {
        match self.observers.iter().position(|(existing, _)| *existing == id) {
            Some(index) => {
                self.observers.remove(index);
                true
            }
            None => {
                log::debug!("Tried to remove unknown {}", id);
                false
            }
        }
    }

    fn notify_observers(&mut self) {
        for (_, observer) in self.observers.iter_mut() {
            observer.on_state_changed(&self.state);
        }
    }

    /// Current state. Read-only; change it through `dispatch`.
    pub fn data(&self) -> &R::State {
        &self.state
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn is_batching(&self) -> bool {
        self.batch_depth > 0
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Number of deferred actions waiting for `init`
    pub fn queued_len(&self) -> usize {
        self.queued.len()
    }

    /// A dispatcher feeding this store's pending channel
    pub fn dispatcher(&self) -> Dispatcher<R::Action> {
        self.dispatcher.clone()
    }
}

impl<R> Default for Store<R>
where
    R: Reducer + Default,
    R::State: Clone + Default + 'static,
    R::Action: Send + 'static,
{
    fn default() -> Self {
        Self::new(R::default(), R::State::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reducer::reducer_fn;
    use pretty_assertions::assert_eq;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Counter {
        n: i32,
    }

    #[derive(Debug, Clone, PartialEq)]
    enum Action {
        Inc,
        Add(i32),
        Boom,
    }

    fn counter_reducer() -> impl Reducer<State = Counter, Action = Action> {
        reducer_fn(|mut state: Counter, action: &Action| {
            match action {
                Action::Inc => state.n += 1,
                Action::Add(k) => state.n += k,
                Action::Boom => panic!("reducer failure"),
            }
            state
        })
    }

    fn new_store() -> Store<impl Reducer<State = Counter, Action = Action>> {
        Store::new(counter_reducer(), Counter::default())
    }

    /// Observer recording every state it is notified with
    fn recorder() -> (Arc<Mutex<Vec<Counter>>>, impl FnMut(&Counter) + Send + 'static) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        (seen, move |state: &Counter| {
            sink.lock().unwrap().push(state.clone());
        })
    }

    #[test]
    fn test_dispatch_before_init_is_queued() {
        let mut store = new_store();
        let (seen, observer) = recorder();
        store.add_observer(observer);

        store.dispatch(Action::Inc);
        store.dispatch(Action::Inc);

        assert!(!store.is_initialized());
        assert_eq!(store.queued_len(), 2);
        assert_eq!(store.data().n, 0);
        assert!(seen.lock().unwrap().is_empty());

        store.init(Counter { n: 0 }).unwrap();

        assert!(store.is_initialized());
        assert_eq!(store.data().n, 2);
        assert_eq!(*seen.lock().unwrap(), vec![Counter { n: 2 }]);
    }

    #[test]
    fn test_queued_actions_apply_in_dispatch_order() {
        let mut store = Store::new(
            reducer_fn(|mut state: Vec<i32>, action: &i32| {
                state.push(*action);
                state
            }),
            Vec::new(),
        );

        store.dispatch(1);
        store.dispatch_async(|ctx| {
            ctx.dispatch(2);
            ctx.dispatch(3);
        });
        store.dispatch(4);
        store.init(vec![0]).unwrap();

        assert_eq!(*store.data(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_init_with_empty_queue_notifies_once() {
        let mut store = new_store();
        let (seen, observer) = recorder();
        store.add_observer(observer);

        store.init(Counter { n: 5 }).unwrap();

        assert_eq!(*seen.lock().unwrap(), vec![Counter { n: 5 }]);
    }

    #[test]
    fn test_second_init_is_rejected() {
        let mut store = new_store();
        store.init(Counter { n: 1 }).unwrap();
        store.dispatch(Action::Inc);

        assert_eq!(store.init(Counter { n: 100 }), Err(StoreError::AlreadyInitialized));
        assert_eq!(store.data().n, 2);
    }

    #[test]
    fn test_dispatch_after_init_applies_immediately() {
        let mut store = new_store();
        let (seen, observer) = recorder();
        store.init(Counter::default()).unwrap();
        store.add_observer(observer);

        store.dispatch(Action::Add(3));
        assert_eq!(store.data().n, 3);

        store.dispatch(Action::Inc);
        assert_eq!(store.data().n, 4);

        assert_eq!(*seen.lock().unwrap(), vec![Counter { n: 3 }, Counter { n: 4 }]);
    }

    #[test]
    fn test_none_action_is_noop() {
        let mut store = new_store();
        let (seen, observer) = recorder();
        store.init(Counter { n: 7 }).unwrap();
        store.add_observer(observer);

        store.dispatch(None);
        store.dispatch_async(|ctx| ctx.dispatch(None));

        assert_eq!(store.data().n, 7);
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_deferred_action_may_dispatch_many_times() {
        let mut store = new_store();
        let (seen, observer) = recorder();
        store.init(Counter::default()).unwrap();
        store.add_observer(observer);

        store.dispatch_async(|ctx| {
            ctx.dispatch(Action::Inc);
            ctx.dispatch(Action::Add(10));
        });

        assert_eq!(store.data().n, 11);
        assert_eq!(seen.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_deferred_action_may_dispatch_nothing() {
        let mut store = new_store();
        let (seen, observer) = recorder();
        store.init(Counter::default()).unwrap();
        store.add_observer(observer);

        store.dispatch_async(|_ctx| {});

        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_batch_coalesces_notifications() {
        let mut store = new_store();
        let (seen, observer) = recorder();
        store.add_observer(observer);
        store.init(Counter { n: 0 }).unwrap();
        seen.lock().unwrap().clear();

        store.begin_batch_update();
        store.dispatch(Action::Inc);
        store.dispatch(Action::Inc);
        store.dispatch(Action::Inc);
        assert!(seen.lock().unwrap().is_empty());
        assert_eq!(store.data().n, 3);

        store.end_batch_update().unwrap();

        assert_eq!(*seen.lock().unwrap(), vec![Counter { n: 3 }]);
    }

    #[test]
    fn test_scenario_counts_exactly_one_notification_for_batch() {
        let mut store = new_store();
        store.init(Counter { n: 0 }).unwrap();
        let (seen, observer) = recorder();
        store.add_observer(observer);

        store.begin_batch_update();
        for _ in 0..3 {
            store.dispatch(Action::Inc);
        }
        store.end_batch_update().unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(store.data().n, 3);
    }

    #[test]
    fn test_nested_batches_notify_on_outermost_end() {
        let mut store = new_store();
        store.init(Counter::default()).unwrap();
        let (seen, observer) = recorder();
        store.add_observer(observer);

        store.begin_batch_update();
        store.begin_batch_update();
        store.dispatch(Action::Inc);
        store.end_batch_update().unwrap();
        assert!(store.is_batching());
        assert!(seen.lock().unwrap().is_empty());

        store.dispatch(Action::Inc);
        store.end_batch_update().unwrap();

        assert!(!store.is_batching());
        assert_eq!(*seen.lock().unwrap(), vec![Counter { n: 2 }]);
    }

    #[test]
    fn test_unbalanced_end_batch_is_an_error() {
        let mut store = new_store();
        store.init(Counter::default()).unwrap();

        assert_eq!(store.end_batch_update(), Err(StoreError::NoBatchInProgress));
    }

    #[test]
    fn test_batch_update_closure() {
        let mut store = new_store();
        store.init(Counter::default()).unwrap();
        let (seen, observer) = recorder();
        store.add_observer(observer);

        let returned = store.batch_update(|store| {
            store.dispatch(Action::Add(2));
            store.dispatch(Action::Add(2));
            store.data().n
        });

        assert_eq!(returned, 4);
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_removed_observer_is_not_notified() {
        let mut store = new_store();
        store.init(Counter::default()).unwrap();
        let (kept, kept_observer) = recorder();
        let (removed, removed_observer) = recorder();
        store.add_observer(kept_observer);
        let id = store.add_observer(removed_observer);

        store.dispatch(Action::Inc);
        assert!(store.remove_observer(id));
        store.dispatch(Action::Inc);

        assert_eq!(kept.lock().unwrap().len(), 2);
        assert_eq!(*removed.lock().unwrap(), vec![Counter { n: 1 }]);
        assert_eq!(store.observer_count(), 1);
    }

    #[test]
    fn test_removing_unknown_observer_is_noop() {
        let mut store = new_store();
        let id = store.add_observer(|_: &Counter| {});
        assert!(store.remove_observer(id));
        assert!(!store.remove_observer(id));
    }

    #[test]
    fn test_dispatcher_actions_wait_for_process_pending() {
        let mut store = new_store();
        store.init(Counter::default()).unwrap();
        let dispatcher = store.dispatcher();

        dispatcher.dispatch(Action::Inc);
        dispatcher.dispatch(Action::Inc);
        assert_eq!(store.data().n, 0);

        assert_eq!(store.process_pending(), 2);
        assert_eq!(store.data().n, 2);
        assert_eq!(store.process_pending(), 0);
    }

    #[test]
    fn test_dispatcher_actions_before_init_are_folded_into_init() {
        let mut store = new_store();
        let (seen, observer) = recorder();
        store.add_observer(observer);
        store.dispatcher().dispatch(Action::Add(5));
        store.dispatch(Action::Inc);

        assert_eq!(store.process_pending(), 0);
        store.init(Counter::default()).unwrap();

        assert_eq!(*seen.lock().unwrap(), vec![Counter { n: 6 }]);
    }

    #[test]
    fn test_deferred_action_can_hand_out_dispatcher() {
        let mut store = new_store();
        store.init(Counter::default()).unwrap();
        let slot = Arc::new(Mutex::new(None));
        let captured = slot.clone();

        store.dispatch_async(move |ctx| {
            ctx.dispatch(Action::Inc);
            *captured.lock().unwrap() = Some(ctx.dispatcher());
        });
        let dispatcher = slot.lock().unwrap().take().unwrap();
        dispatcher.dispatch(Action::Add(100));
        store.process_pending();

        assert_eq!(store.data().n, 101);
    }

    #[test]
    fn test_panicking_reducer_leaves_state_intact() {
        let mut store = new_store();
        store.init(Counter { n: 9 }).unwrap();

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            store.dispatch(Action::Boom);
        }));

        assert!(result.is_err());
        assert_eq!(store.data().n, 9);
    }
}
