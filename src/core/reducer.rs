//! Reducers: pure functions from (state, action) to the next state.

use super::action::Action;
use std::marker::PhantomData;
use thiserror::Error;

/// Error raised by a reducer that cannot process an action.
///
/// A failing reducer aborts the dispatch it was called from; the store keeps
/// its previous state.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("{message}")]
pub struct ReducerError {
    pub message: String,
}

impl ReducerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Pure state transition function.
///
/// Implementations must be deterministic, must not mutate `state` or
/// `action`, and must be total over the actions they accept: an unknown
/// kind yields a state (see [`Fallback`]), never an error.
///
/// Any closure `Fn(&S, &A) -> Result<S, ReducerError>` is a reducer.
///
/// # Example
///
/// ```rust
/// use tally::core::{PlainAction, Reducer, ReducerError};
///
/// let counter = |state: &i64, action: &PlainAction| -> Result<i64, ReducerError> {
///     match action.kind.as_str() {
///         "INCREMENT" => Ok(state + 1),
///         _ => Ok(*state),
///     }
/// };
///
/// assert_eq!(counter.reduce(&1, &PlainAction::new("INCREMENT")), Ok(2));
/// assert_eq!(counter.reduce(&1, &PlainAction::new("UNKNOWN")), Ok(1));
/// ```
pub trait Reducer<S, A: Action>: Send + Sync {
    /// Compute the next state.
    fn reduce(&self, state: &S, action: &A) -> Result<S, ReducerError>;

    /// State to start from when a store is built without an explicit one.
    ///
    /// Default implementation returns `None`.
    fn default_state(&self) -> Option<S> {
        None
    }
}

impl<S, A, F> Reducer<S, A> for F
where
    A: Action,
    F: Fn(&S, &A) -> Result<S, ReducerError> + Send + Sync,
{
    fn reduce(&self, state: &S, action: &A) -> Result<S, ReducerError> {
        self(state, action)
    }
}

/// What a reducer returns for an action kind it does not handle.
///
/// Neither choice is an error; the store still notifies subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Fallback {
    /// Keep the current state.
    #[default]
    Preserve,

    /// Go back to the reducer's default state.
    Reset,
}

impl Fallback {
    /// Resolve the catch-all branch of a reducer.
    ///
    /// ```rust
    /// use tally::core::Fallback;
    ///
    /// assert_eq!(Fallback::Preserve.apply(&5, || 0), 5);
    /// assert_eq!(Fallback::Reset.apply(&5, || 0), 0);
    /// ```
    pub fn apply<S, D>(self, current: &S, default: D) -> S
    where
        S: Clone,
        D: FnOnce() -> S,
    {
        match self {
            Self::Preserve => current.clone(),
            Self::Reset => default(),
        }
    }
}

/// Reducer built from an infallible closure, with an optional default state.
///
/// ```rust
/// use tally::core::{FnReducer, PlainAction, Reducer};
///
/// let doubler = FnReducer::new(|state: &i32, _action: &PlainAction| state * 2).with_default(1);
///
/// assert_eq!(doubler.default_state(), Some(1));
/// assert_eq!(doubler.reduce(&4, &PlainAction::new("ANY")), Ok(8));
/// ```
pub struct FnReducer<S, A: Action> {
    reduce: Box<dyn Fn(&S, &A) -> S + Send + Sync>,
    default: Option<S>,
    _phantom: PhantomData<fn(A)>,
}

impl<S, A: Action> FnReducer<S, A> {
    pub fn new<F>(reduce: F) -> Self
    where
        F: Fn(&S, &A) -> S + Send + Sync + 'static,
    {
        Self {
            reduce: Box::new(reduce),
            default: None,
            _phantom: PhantomData,
        }
    }

    /// Declare the state a store starts from when none is given.
    pub fn with_default(mut self, state: S) -> Self {
        self.default = Some(state);
        self
    }
}

impl<S, A> Reducer<S, A> for FnReducer<S, A>
where
    S: Clone + Send + Sync,
    A: Action,
{
    fn reduce(&self, state: &S, action: &A) -> Result<S, ReducerError> {
        Ok((self.reduce)(state, action))
    }

    fn default_state(&self) -> Option<S> {
        self.default.clone()
    }
}
