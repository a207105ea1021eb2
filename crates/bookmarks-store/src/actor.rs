//! Store confined to a tokio task
//!
//! [`StoreHandle::spawn`] moves a [`Store`] onto its own task. Every
//! operation becomes a message on one channel, so reductions and
//! notifications never interleave no matter how many tasks hold a handle.
//! The task also drains the store's [`Dispatcher`] channel. Once the store
//! is initialized, actions already sent through the dispatcher are applied
//! before the next command, so a task that dispatches and then asks for a
//! snapshot sees its own actions.

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::dispatcher::{DeferredAction, DispatchContext, Dispatcher};
use crate::error::StoreError;
use crate::observer::{Observer, ObserverId};
use crate::reducer::Reducer;
use crate::store::Store;

type Reply<T> = oneshot::Sender<T>;

enum Command<R: Reducer> {
    Init(R::State, Reply<Result<(), StoreError>>),
    Dispatch(Option<R::Action>),
    DispatchDeferred(DeferredAction<R::Action>),
    BeginBatch,
    EndBatch(Reply<Result<(), StoreError>>),
    AddObserver(Box<dyn Observer<R::State>>, Reply<ObserverId>),
    RemoveObserver(ObserverId, Reply<bool>),
    Snapshot(Reply<R::State>),
    IsInitialized(Reply<bool>),
}

/// Cloneable handle to a store running on its own task
///
/// The task stops once every handle has been dropped and yields the store
/// back through the [`JoinHandle`] returned by [`spawn`](StoreHandle::spawn).
pub struct StoreHandle<R: Reducer> {
    commands: mpsc::UnboundedSender<Command<R>>,
    dispatcher: Dispatcher<R::Action>,
}

impl<R: Reducer> Clone for StoreHandle<R> {
    fn clone(&self) -> Self {
        Self {
            commands: self.commands.clone(),
            dispatcher: self.dispatcher.clone(),
        }
    }
}

impl<R> StoreHandle<R>
where
    R: Reducer + Send + 'static,
    R::State: Clone + Send + 'static,
    R::Action: Send + 'static,
{
    /// Move `store` onto a new tokio task. Must be called within a runtime.
    pub fn spawn(store: Store<R>) -> (Self, JoinHandle<Store<R>>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = Self {
            commands: tx,
            dispatcher: store.dispatcher(),
        };
        let task = tokio::spawn(run(store, rx));
        (handle, task)
    }

    fn send(&self, command: Command<R>) -> Result<(), StoreError> {
        self.commands
            .send(command)
            .map_err(|_| StoreError::ActorStopped)
    }

    async fn request<T>(&self, command: impl FnOnce(Reply<T>) -> Command<R>) -> Result<T, StoreError> {
        let (tx, rx) = oneshot::channel();
        self.send(command(tx))?;
        rx.await.map_err(|_| StoreError::ActorStopped)
    }

    pub async fn init(&self, initial_state: R::State) -> Result<(), StoreError> {
        self.request(|reply| Command::Init(initial_state, reply)).await?
    }

    pub fn dispatch(&self, action: impl Into<Option<R::Action>>) -> Result<(), StoreError> {
        self.send(Command::Dispatch(action.into()))
    }

    pub fn dispatch_async<F>(&self, deferred: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut DispatchContext<'_, R::Action>) + Send + 'static,
    {
        self.send(Command::DispatchDeferred(Box::new(deferred)))
    }

    pub fn begin_batch_update(&self) -> Result<(), StoreError> {
        self.send(Command::BeginBatch)
    }

    pub async fn end_batch_update(&self) -> Result<(), StoreError> {
        self.request(Command::EndBatch).await?
    }

    pub async fn add_observer<O>(&self, observer: O) -> Result<ObserverId, StoreError>
    where
        O: Observer<R::State> + 'static,
    {
        self.request(|reply| Command::AddObserver(Box::new(observer), reply))
            .await
    }

    pub async fn remove_observer(&self, id: ObserverId) -> Result<bool, StoreError> {
        self.request(|reply| Command::RemoveObserver(id, reply)).await
    }

    /// Clone of the current state
    pub async fn snapshot(&self) -> Result<R::State, StoreError> {
        self.request(Command::Snapshot).await
    }

    pub async fn is_initialized(&self) -> Result<bool, StoreError> {
        self.request(Command::IsInitialized).await
    }

    pub fn dispatcher(&self) -> Dispatcher<R::Action> {
        self.dispatcher.clone()
    }
}

async fn run<R>(mut store: Store<R>, mut commands: mpsc::UnboundedReceiver<Command<R>>) -> Store<R>
where
    R: Reducer,
    R::State: Clone + 'static,
    R::Action: Send + 'static,
{
    log::debug!("Store actor started");

    loop {
        tokio::select! {
            command = commands.recv() => match command {
                Some(command) => {
                    store.process_pending();
                    handle(&mut store, command);
                }
                None => break,
            },
            Some(action) = store.recv_pending() => store.dispatch(action),
        }
    }

    log::debug!("Store actor stopped, all handles dropped");
    store
}

fn handle<R>(store: &mut Store<R>, command: Command<R>)
where
    R: Reducer,
    R::State: Clone + 'static,
    R::Action: Send + 'static,
{
    // Replies fail only when the caller stopped waiting.
    match command {
        Command::Init(state, reply) => {
            let _ = reply.send(store.init(state));
        }
        Command::Dispatch(action) => store.dispatch(action),
        Command::DispatchDeferred(deferred) => store.dispatch_deferred(deferred),
        Command::BeginBatch => store.begin_batch_update(),
        Command::EndBatch(reply) => {
            let _ = reply.send(store.end_batch_update());
        }
        Command::AddObserver(observer, reply) => {
            let _ = reply.send(store.add_boxed_observer(observer));
        }
        Command::RemoveObserver(id, reply) => {
            let _ = reply.send(store.remove_observer(id));
        }
        Command::Snapshot(reply) => {
            let _ = reply.send(store.data().clone());
        }
        Command::IsInitialized(reply) => {
            let _ = reply.send(store.is_initialized());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone)]
    enum Action {
        Inc,
    }

    struct CounterReducer;

    impl Reducer for CounterReducer {
        type State = u32;
        type Action = Action;

        fn reduce(&self, state: u32, action: &Action) -> u32 {
            match action {
                Action::Inc => state + 1,
            }
        }
    }

    fn spawn_counter() -> (StoreHandle<CounterReducer>, JoinHandle<Store<CounterReducer>>) {
        StoreHandle::spawn(Store::new(CounterReducer, 0))
    }

    #[tokio::test]
    async fn test_actor_queues_until_init() {
        let (handle, _task) = spawn_counter();

        handle.dispatch(Action::Inc).unwrap();
        handle.dispatch(Action::Inc).unwrap();
        assert!(!handle.is_initialized().await.unwrap());
        assert_eq!(handle.snapshot().await.unwrap(), 0);

        handle.init(0).await.unwrap();

        assert!(handle.is_initialized().await.unwrap());
        assert_eq!(handle.snapshot().await.unwrap(), 2);
        assert_eq!(handle.init(0).await, Err(StoreError::AlreadyInitialized));
    }

    #[tokio::test]
    async fn test_actor_notifies_observers() {
        let (handle, _task) = spawn_counter();
        let (tx, mut rx) = mpsc::unbounded_channel();
        handle
            .add_observer(move |state: &u32| {
                let _ = tx.send(*state);
            })
            .await
            .unwrap();

        handle.init(10).await.unwrap();
        handle.begin_batch_update().unwrap();
        handle.dispatch(Action::Inc).unwrap();
        handle.dispatch(Action::Inc).unwrap();
        handle.end_batch_update().await.unwrap();

        assert_eq!(rx.recv().await, Some(10));
        assert_eq!(rx.recv().await, Some(12));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_actor_applies_actions_from_spawned_tasks() {
        let (handle, _task) = spawn_counter();
        let (tx, mut rx) = mpsc::unbounded_channel();
        handle
            .add_observer(move |state: &u32| {
                let _ = tx.send(*state);
            })
            .await
            .unwrap();
        handle.init(0).await.unwrap();
        assert_eq!(rx.recv().await, Some(0));

        handle
            .dispatch_async(|ctx| {
                ctx.dispatch(Action::Inc);
                let dispatcher = ctx.dispatcher();
                tokio::spawn(async move { dispatcher.dispatch(Action::Inc) });
            })
            .unwrap();

        assert_eq!(rx.recv().await, Some(1));
        assert_eq!(rx.recv().await, Some(2));
    }

    #[tokio::test]
    async fn test_dispatcher_actions_precede_later_commands() {
        let (handle, _task) = spawn_counter();
        handle.init(0).await.unwrap();

        let dispatcher = handle.dispatcher();
        for _ in 0..50 {
            dispatcher.dispatch(Action::Inc);
        }
        handle.dispatch(Action::Inc).unwrap();

        assert_eq!(handle.snapshot().await.unwrap(), 51);
    }

    #[tokio::test]
    async fn test_actor_remove_observer() {
        let (handle, _task) = spawn_counter();
        let id = handle.add_observer(|_: &u32| {}).await.unwrap();

        assert!(handle.remove_observer(id).await.unwrap());
        assert!(!handle.remove_observer(id).await.unwrap());
    }

    #[tokio::test]
    async fn test_actor_returns_store_when_handles_dropped() {
        let (handle, task) = spawn_counter();
        handle.init(3).await.unwrap();
        handle.dispatch(Action::Inc).unwrap();
        drop(handle);

        let store = task.await.unwrap();
        assert_eq!(*store.data(), 4);
    }
}
