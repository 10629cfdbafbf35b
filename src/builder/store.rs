//! Builder for constructing stores.

use crate::builder::error::BuildError;
use crate::checkpoint::Checkpoint;
use crate::core::{Action, DispatchHistory, Reducer};
use crate::middleware::Middleware;
use crate::store::{ReentrancyPolicy, Store, StoreParts};

/// Builder for constructing stores with a fluent API.
///
/// # Example
///
/// ```rust
/// use tally::builder::StoreBuilder;
/// use tally::core::{FnReducer, PlainAction};
/// use tally::middleware::TracingLogger;
///
/// let store = StoreBuilder::new()
///     .reducer(FnReducer::new(|n: &u32, _: &PlainAction| n + 1).with_default(100))
///     .middleware(TracingLogger)
///     .history_capacity(16)
///     .build()
///     .unwrap();
///
/// store.dispatch(PlainAction::new("TICK")).unwrap();
/// assert_eq!(*store.state(), 101);
/// assert_eq!(store.history().unwrap().kinds(), vec!["TICK"]);
/// ```
pub struct StoreBuilder<S, A: Action> {
    initial: Option<S>,
    reducer: Option<Box<dyn Reducer<S, A>>>,
    middleware: Vec<Box<dyn Middleware<S, A>>>,
    history: Option<DispatchHistory>,
    policy: ReentrancyPolicy,
    dispatch_count: u64,
}

impl<S, A> StoreBuilder<S, A>
where
    S: Send + Sync + 'static,
    A: Action,
{
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            initial: None,
            reducer: None,
            middleware: Vec::new(),
            history: None,
            policy: ReentrancyPolicy::default(),
            dispatch_count: 0,
        }
    }

    /// Set the reducer (required).
    pub fn reducer<R>(mut self, reducer: R) -> Self
    where
        R: Reducer<S, A> + 'static,
    {
        self.reducer = Some(Box::new(reducer));
        self
    }

    /// Set the initial state.
    ///
    /// Optional when the reducer declares a default state.
    pub fn initial(mut self, state: S) -> Self {
        self.initial = Some(state);
        self
    }

    /// Append a middleware. Middleware runs in the order it is added.
    pub fn middleware<M>(mut self, middleware: M) -> Self
    where
        M: Middleware<S, A> + 'static,
    {
        self.middleware.push(Box::new(middleware));
        self
    }

    /// Record every successful dispatch in an unbounded history.
    pub fn track_history(mut self) -> Self {
        self.history = Some(DispatchHistory::new());
        self
    }

    /// Record dispatches, keeping only the most recent `capacity`.
    pub fn history_capacity(mut self, capacity: usize) -> Self {
        self.history = Some(DispatchHistory::bounded(capacity));
        self
    }

    /// Choose how nested dispatches are handled (default: queue).
    pub fn reentrancy(mut self, policy: ReentrancyPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Start from a checkpoint: its state, history and dispatch counter.
    ///
    /// A checkpoint that carries a history replaces any history setting made
    /// on the builder. One without a history leaves that setting alone, so
    /// tracking starts fresh from the resumed state.
    pub fn resume(mut self, checkpoint: Checkpoint<S>) -> Self {
        self.initial = Some(checkpoint.state);
        if checkpoint.history.is_some() {
            self.history = checkpoint.history;
        }
        self.dispatch_count = checkpoint.dispatch_count;
        self
    }

    /// Build the store.
    /// Returns an error if the reducer is missing, or if no initial state
    /// was given and the reducer has no default.
    pub fn build(self) -> Result<Store<S, A>, BuildError> {
        let reducer = self.reducer.ok_or(BuildError::MissingReducer)?;
        let initial = match self.initial {
            Some(state) => state,
            None => reducer
                .default_state()
                .ok_or(BuildError::MissingInitialState)?,
        };

        tracing::debug!(
            middleware = self.middleware.len(),
            history = self.history.is_some(),
            policy = ?self.policy,
            "Store built"
        );

        Ok(Store::assemble(StoreParts {
            initial,
            reducer,
            middleware: self.middleware,
            history: self.history,
            policy: self.policy,
            dispatch_count: self.dispatch_count,
        }))
    }
}

impl<S, A> Default for StoreBuilder<S, A>
where
    S: Send + Sync + 'static,
    A: Action,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FnReducer, PlainAction, ReducerError};
    use crate::middleware::{ActionGuard, Flow};
    use crate::store::DispatchError;
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn noise(state: &i32, action: &PlainAction) -> Result<i32, ReducerError> {
        match action.kind.as_str() {
            "SCREAM" => Ok(10),
            "SILENCE" => Ok(0),
            "MURMUR" => Ok(5),
            _ => Ok(*state),
        }
    }

    #[test]
    fn builder_requires_reducer() {
        let result = StoreBuilder::<i32, PlainAction>::new().initial(0).build();

        assert!(matches!(result, Err(BuildError::MissingReducer)));
    }

    #[test]
    fn builder_requires_some_initial_state() {
        let result = StoreBuilder::<i32, PlainAction>::new().reducer(noise).build();

        assert!(matches!(result, Err(BuildError::MissingInitialState)));
    }

    #[test]
    fn reducer_default_seeds_state() {
        let store = StoreBuilder::new()
            .reducer(FnReducer::new(|n: &i32, _: &PlainAction| n + 1).with_default(7))
            .build()
            .unwrap();

        assert_eq!(*store.state(), 7);
    }

    #[test]
    fn explicit_initial_wins_over_default() {
        let store = StoreBuilder::new()
            .reducer(FnReducer::new(|n: &i32, _: &PlainAction| n + 1).with_default(7))
            .initial(1)
            .build()
            .unwrap();

        assert_eq!(*store.state(), 1);
    }

    #[test]
    fn history_is_off_unless_requested() {
        let store = StoreBuilder::new()
            .reducer(noise)
            .initial(0)
            .build()
            .unwrap();

        store.dispatch(PlainAction::new("SCREAM")).unwrap();
        assert!(store.history().is_none());
    }

    #[test]
    fn bounded_history_keeps_latest_dispatches() {
        let store = StoreBuilder::new()
            .reducer(noise)
            .initial(0)
            .history_capacity(2)
            .build()
            .unwrap();

        for kind in ["SCREAM", "SILENCE", "MURMUR"] {
            store.dispatch(PlainAction::new(kind)).unwrap();
        }

        let history = store.history().unwrap();
        assert_eq!(history.kinds(), vec!["SILENCE", "MURMUR"]);
        let sequences: Vec<u64> = history.records().map(|r| r.sequence).collect();
        assert_eq!(sequences, vec![2, 3]);
    }

    #[test]
    fn failed_dispatch_is_not_recorded() {
        let store = StoreBuilder::new()
            .reducer(|_: &i32, action: &PlainAction| -> Result<i32, ReducerError> {
                if action.kind == "BAD" {
                    Err(ReducerError::new("bad action"))
                } else {
                    Ok(1)
                }
            })
            .initial(0)
            .track_history()
            .build()
            .unwrap();

        store.dispatch(PlainAction::new("GOOD")).unwrap();
        assert!(store.dispatch(PlainAction::new("BAD")).is_err());

        assert_eq!(store.history().unwrap().kinds(), vec!["GOOD"]);
    }

    #[test]
    fn halting_middleware_blocks_reduction_and_notification() {
        let store = StoreBuilder::new()
            .reducer(noise)
            .initial(5)
            .middleware(ActionGuard::allow_kinds("quiet-hours", ["SILENCE", "MURMUR"]))
            .build()
            .unwrap();
        let notified = Arc::new(Mutex::new(0));
        let seen = Arc::clone(&notified);
        store.subscribe(move || *seen.lock() += 1);

        let err = store.dispatch(PlainAction::new("SCREAM")).unwrap_err();

        assert_eq!(
            err,
            DispatchError::Halted {
                kind: "SCREAM".to_string(),
                middleware: "quiet-hours".to_string(),
            }
        );
        assert_eq!(*store.state(), 5);
        assert_eq!(*notified.lock(), 0);

        store.dispatch(PlainAction::new("SILENCE")).unwrap();
        assert_eq!(*store.state(), 0);
        assert_eq!(*notified.lock(), 1);
    }

    struct Recorder {
        events: Arc<Mutex<Vec<String>>>,
        tag: &'static str,
    }

    impl Middleware<i32, PlainAction> for Recorder {
        fn before(&self, action: &PlainAction, state: &i32) -> Flow {
            self.events
                .lock()
                .push(format!("{} before {} @ {}", self.tag, action.kind, state));
            Flow::Continue
        }

        fn after(&self, action: &PlainAction, previous: &i32, next: &i32) {
            self.events.lock().push(format!(
                "{} after {} {} -> {}",
                self.tag, action.kind, previous, next
            ));
        }
    }

    #[test]
    fn middleware_runs_in_order_around_reduction() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let store = StoreBuilder::new()
            .reducer(noise)
            .initial(0)
            .middleware(Recorder {
                events: Arc::clone(&events),
                tag: "outer",
            })
            .middleware(Recorder {
                events: Arc::clone(&events),
                tag: "inner",
            })
            .build()
            .unwrap();
        let log = Arc::clone(&events);
        store.subscribe(move || log.lock().push("subscriber".to_string()));

        store.dispatch(PlainAction::new("MURMUR")).unwrap();

        assert_eq!(
            *events.lock(),
            vec![
                "outer before MURMUR @ 0",
                "inner before MURMUR @ 0",
                "outer after MURMUR 0 -> 5",
                "inner after MURMUR 0 -> 5",
                "subscriber",
            ]
        );
    }

    fn checkpoint(history: Option<DispatchHistory>) -> Checkpoint<i32> {
        Checkpoint {
            version: crate::checkpoint::CHECKPOINT_VERSION,
            id: "resume-test".to_string(),
            timestamp: chrono::Utc::now(),
            state: 5,
            history,
            dispatch_count: 4,
        }
    }

    #[test]
    fn resume_without_history_keeps_builder_history_setting() {
        let store = StoreBuilder::new()
            .reducer(noise)
            .history_capacity(8)
            .resume(checkpoint(None))
            .build()
            .unwrap();

        store.dispatch(PlainAction::new("SCREAM")).unwrap();

        let history = store.history().unwrap();
        assert_eq!(history.capacity(), Some(8));
        assert_eq!(history.kinds(), vec!["SCREAM"]);
        assert_eq!(history.last().map(|r| r.sequence), Some(5));
    }

    #[test]
    fn resume_with_history_replaces_builder_history_setting() {
        let store = StoreBuilder::new()
            .reducer(noise)
            .history_capacity(8)
            .resume(checkpoint(Some(DispatchHistory::new())))
            .build()
            .unwrap();

        assert_eq!(*store.state(), 5);
        assert_eq!(store.history().unwrap().capacity(), None);
    }

    #[test]
    fn reentrancy_policy_is_configurable() {
        let store = StoreBuilder::new()
            .reducer(noise)
            .initial(0)
            .reentrancy(ReentrancyPolicy::Reject)
            .build()
            .unwrap();

        assert_eq!(store.reentrancy_policy(), ReentrancyPolicy::Reject);
    }
}
