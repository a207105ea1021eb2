//! Reducers - pure functions producing the next state from the current state and an action

use std::fmt::Debug;
use std::marker::PhantomData;

/// A pure state transition function.
///
/// Implementations must be total: actions they do not recognise return the
/// state unchanged.
pub trait Reducer {
    type State;
    type Action;

    fn reduce(&self, state: Self::State, action: &Self::Action) -> Self::State;
}

/// Adapter turning a closure `Fn(S, &A) -> S` into a [`Reducer`].
pub struct FnReducer<F, S, A> {
    f: F,
    _marker: PhantomData<fn(S, &A) -> S>,
}

/// Wrap a closure as a [`Reducer`].
pub fn reducer_fn<F, S, A>(f: F) -> FnReducer<F, S, A>
where
    F: Fn(S, &A) -> S,
{
    FnReducer {
        f,
        _marker: PhantomData,
    }
}

impl<F, S, A> Reducer for FnReducer<F, S, A>
where
    F: Fn(S, &A) -> S,
{
    type State = S;
    type Action = A;

    fn reduce(&self, state: S, action: &A) -> S {
        (self.f)(state, action)
    }
}

/// Logs every action passing through before handing it to the inner reducer.
pub struct LoggingReducer<R> {
    inner: R,
}

impl<R> LoggingReducer<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }
}

impl<R> Reducer for LoggingReducer<R>
where
    R: Reducer,
    R::Action: Debug,
{
    type State = R::State;
    type Action = R::Action;

    fn reduce(&self, state: Self::State, action: &Self::Action) -> Self::State {
        log::debug!("Action: {:?}", action);
        self.inner.reduce(state, action)
    }
}
