//! Predicate middleware that halts actions before they reach the reducer.

use super::{Flow, Middleware};
use crate::core::Action;

/// Pure predicate deciding whether an action may be reduced.
///
/// The predicate sees the action and the state it would be applied to. When
/// it returns `false` the dispatch is halted.
///
/// # Example
///
/// ```rust
/// use tally::core::PlainAction;
/// use tally::middleware::{ActionGuard, Flow, Middleware};
///
/// // Ignore anything while the volume is already at the cap
/// let cap = ActionGuard::new("volume-cap", |_action: &PlainAction, level: &u8| *level < 10);
///
/// assert!(cap.check(&PlainAction::new("UP"), &3));
/// assert_eq!(cap.before(&PlainAction::new("UP"), &10), Flow::Halt);
/// ```
pub struct ActionGuard<S, A: Action> {
    name: String,
    predicate: Box<dyn Fn(&A, &S) -> bool + Send + Sync>,
}

impl<S, A: Action> ActionGuard<S, A> {
    /// Create a guard from a pure predicate.
    pub fn new<F>(name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&A, &S) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            predicate: Box::new(predicate),
        }
    }

    /// Guard that only lets the listed kinds through.
    pub fn allow_kinds<I, K>(name: impl Into<String>, kinds: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
        S: 'static,
    {
        let allowed: Vec<String> = kinds.into_iter().map(Into::into).collect();
        Self::new(name, move |action: &A, _state: &S| {
            allowed.iter().any(|kind| kind == action.kind())
        })
    }

    /// Evaluate the predicate.
    pub fn check(&self, action: &A, state: &S) -> bool {
        (self.predicate)(action, state)
    }
}

impl<S, A: Action> Middleware<S, A> for ActionGuard<S, A> {
    fn name(&self) -> &str {
        &self.name
    }

    fn before(&self, action: &A, state: &S) -> Flow {
        if self.check(action, state) {
            Flow::Continue
        } else {
            tracing::debug!(guard = %self.name, kind = action.kind(), "Action rejected by guard");
            Flow::Halt
        }
    }
}
