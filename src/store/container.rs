//! The state container: one state slot, one reducer, ordered subscribers.

use crate::core::{Action, DispatchHistory, DispatchRecord, Reducer};
use crate::middleware::{Flow, Middleware};
use crate::store::error::DispatchError;
use crate::store::subscription::{ListenerRegistry, Subscription};
use chrono::Utc;
use parking_lot::{Mutex, ReentrantMutex, RwLock};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// What happens when a subscriber or middleware dispatches while a dispatch
/// is already running on the same thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReentrancyPolicy {
    /// Queue the action and reduce it once the running dispatch has notified
    /// its subscribers. Queued actions are applied in FIFO order before the
    /// outer `dispatch` returns.
    #[default]
    Queue,

    /// Fail the nested dispatch with `DispatchError::Reentrant`.
    Reject,
}

/// Everything a store is assembled from.
pub(crate) struct StoreParts<S, A: Action> {
    pub(crate) initial: S,
    pub(crate) reducer: Box<dyn Reducer<S, A>>,
    pub(crate) middleware: Vec<Box<dyn Middleware<S, A>>>,
    pub(crate) history: Option<DispatchHistory>,
    pub(crate) policy: ReentrancyPolicy,
    pub(crate) dispatch_count: u64,
}

struct Gate<A> {
    active: bool,
    queue: VecDeque<A>,
}

struct Inner<S, A: Action> {
    state: RwLock<Arc<S>>,
    reducer: RwLock<Box<dyn Reducer<S, A>>>,
    middleware: Vec<Box<dyn Middleware<S, A>>>,
    listeners: Arc<Mutex<ListenerRegistry>>,
    gate: ReentrantMutex<RefCell<Gate<A>>>,
    history: Mutex<Option<DispatchHistory>>,
    dispatch_count: AtomicU64,
    policy: ReentrancyPolicy,
}

/// Unidirectional state container.
///
/// `Store` is a handle: cloning it yields another handle to the same state
/// slot. All dispatches are serialized; a dispatch runs the reducer, installs
/// the new state and notifies every subscriber before it returns.
///
/// # Example
///
/// ```rust
/// use tally::core::{PlainAction, ReducerError};
/// use tally::Store;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
///
/// let store = Store::new(
///     |count: &i64, action: &PlainAction| -> Result<i64, ReducerError> {
///         match action.kind.as_str() {
///             "INCREMENT" => Ok(count + 1),
///             _ => Ok(*count),
///         }
///     },
///     0,
/// );
///
/// let notified = Arc::new(AtomicUsize::new(0));
/// let seen = Arc::clone(&notified);
/// let subscription = store.subscribe(move || {
///     seen.fetch_add(1, Ordering::SeqCst);
/// });
///
/// store.dispatch(PlainAction::new("INCREMENT")).unwrap();
/// store.dispatch(PlainAction::new("UNKNOWN")).unwrap();
///
/// assert_eq!(*store.state(), 1);
/// assert_eq!(notified.load(Ordering::SeqCst), 2);
///
/// subscription.unsubscribe();
/// store.dispatch(PlainAction::new("INCREMENT")).unwrap();
/// assert_eq!(notified.load(Ordering::SeqCst), 2);
/// ```
pub struct Store<S, A: Action> {
    inner: Arc<Inner<S, A>>,
}

impl<S, A: Action> Clone for Store<S, A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S, A> Store<S, A>
where
    S: Send + Sync + 'static,
    A: Action,
{
    /// Create a store from a reducer and an initial state.
    ///
    /// Use [`StoreBuilder`](crate::builder::StoreBuilder) for middleware,
    /// history or a non-default re-entrancy policy.
    pub fn new<R>(reducer: R, initial: S) -> Self
    where
        R: Reducer<S, A> + 'static,
    {
        Self::assemble(StoreParts {
            initial,
            reducer: Box::new(reducer),
            middleware: Vec::new(),
            history: None,
            policy: ReentrancyPolicy::default(),
            dispatch_count: 0,
        })
    }

    /// Create a store starting from the reducer's default state, or from
    /// `S::default()` when the reducer declares none.
    pub fn with_default<R>(reducer: R) -> Self
    where
        R: Reducer<S, A> + 'static,
        S: Default,
    {
        let initial = reducer.default_state().unwrap_or_default();
        Self::new(reducer, initial)
    }

    pub(crate) fn assemble(parts: StoreParts<S, A>) -> Self {
        Self {
            inner: Arc::new(Inner {
                state: RwLock::new(Arc::new(parts.initial)),
                reducer: RwLock::new(parts.reducer),
                middleware: parts.middleware,
                listeners: Arc::new(Mutex::new(ListenerRegistry::default())),
                gate: ReentrantMutex::new(RefCell::new(Gate {
                    active: false,
                    queue: VecDeque::new(),
                })),
                history: Mutex::new(parts.history),
                dispatch_count: AtomicU64::new(parts.dispatch_count),
                policy: parts.policy,
            }),
        }
    }

    /// Current state snapshot.
    ///
    /// The snapshot is never mutated; later dispatches install a new value
    /// instead.
    pub fn state(&self) -> Arc<S> {
        Arc::clone(&*self.inner.state.read())
    }

    /// Reduce `action` into a new state and notify subscribers.
    ///
    /// Returns the action on success. On failure the previous state stays in
    /// place and no subscriber is called. An action kind the reducer does not
    /// recognize is not a failure: subscribers still run.
    ///
    /// Dispatching from inside a subscriber follows the store's
    /// [`ReentrancyPolicy`].
    pub fn dispatch(&self, action: A) -> Result<A, DispatchError> {
        let gate = self.inner.gate.lock();
        {
            let mut pending = gate.borrow_mut();
            if pending.active {
                return match self.inner.policy {
                    ReentrancyPolicy::Queue => {
                        tracing::trace!(
                            kind = action.kind(),
                            queued = pending.queue.len() + 1,
                            "Nested dispatch queued"
                        );
                        pending.queue.push_back(action.clone());
                        Ok(action)
                    }
                    ReentrancyPolicy::Reject => Err(DispatchError::Reentrant {
                        kind: action.kind().to_string(),
                    }),
                };
            }
            pending.active = true;
        }

        // Reopen the gate even if a subscriber panics.
        let _reopen = scopeguard::guard((), |()| {
            let mut pending = gate.borrow_mut();
            pending.active = false;
            pending.queue.clear();
        });

        self.apply(&action)?;

        loop {
            let next = gate.borrow_mut().queue.pop_front();
            let Some(queued) = next else {
                break;
            };
            if let Err(err) = self.apply(&queued) {
                let discarded = gate.borrow().queue.len();
                if discarded > 0 {
                    tracing::warn!(
                        kind = queued.kind(),
                        discarded,
                        "Queued dispatch failed, discarding the rest of the queue"
                    );
                }
                return Err(err);
            }
        }

        Ok(action)
    }

    fn apply(&self, action: &A) -> Result<(), DispatchError> {
        let kind = action.kind();
        let previous = self.state();

        for middleware in &self.inner.middleware {
            if middleware.before(action, &previous) == Flow::Halt {
                return Err(DispatchError::Halted {
                    kind: kind.to_string(),
                    middleware: middleware.name().to_string(),
                });
            }
        }

        let next = self
            .inner
            .reducer
            .read()
            .reduce(&previous, action)
            .map_err(|source| {
                tracing::debug!(kind, error = %source, "Reducer failed, state unchanged");
                DispatchError::Reducer {
                    kind: kind.to_string(),
                    source,
                }
            })?;
        let next = Arc::new(next);

        *self.inner.state.write() = Arc::clone(&next);
        let sequence = self.inner.dispatch_count.fetch_add(1, Ordering::SeqCst) + 1;

        if let Some(history) = self.inner.history.lock().as_mut() {
            *history = history.record(DispatchRecord {
                sequence,
                kind: kind.to_string(),
                timestamp: Utc::now(),
            });
        }

        for middleware in &self.inner.middleware {
            middleware.after(action, &previous, &next);
        }

        let listeners = self.inner.listeners.lock().snapshot();
        tracing::debug!(
            kind,
            sequence,
            subscribers = listeners.len(),
            "Action dispatched"
        );
        for listener in &listeners {
            listener();
        }

        Ok(())
    }

    /// Register a callback to run after every future successful dispatch.
    ///
    /// Listeners run in registration order. A listener added while a
    /// dispatch is notifying is first called on the next dispatch.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        let id = self.inner.listeners.lock().insert(Arc::new(listener));
        tracing::trace!(id, "Listener subscribed");
        Subscription::new(id, Arc::downgrade(&self.inner.listeners))
    }

    /// Swap the reducer used by future dispatches.
    ///
    /// The current state is kept and subscribers are not notified.
    pub fn replace_reducer<R>(&self, reducer: R)
    where
        R: Reducer<S, A> + 'static,
    {
        *self.inner.reducer.write() = Box::new(reducer);
        tracing::debug!("Reducer replaced");
    }

    /// Number of listeners currently registered.
    pub fn subscriber_count(&self) -> usize {
        self.inner.listeners.lock().len()
    }

    /// Number of successful reductions, including those recorded in a
    /// checkpoint the store was resumed from.
    pub fn dispatch_count(&self) -> u64 {
        self.inner.dispatch_count.load(Ordering::SeqCst)
    }

    /// Dispatch history, when history tracking is enabled.
    pub fn history(&self) -> Option<DispatchHistory> {
        self.inner.history.lock().clone()
    }

    /// How this store handles dispatches issued from inside a dispatch.
    pub fn reentrancy_policy(&self) -> ReentrancyPolicy {
        self.inner.policy
    }

    /// Run `f` with dispatches from other threads held off.
    ///
    /// Reads made inside `f` (state, history, counter) are mutually
    /// consistent.
    pub(crate) fn with_dispatch_lock<T>(&self, f: impl FnOnce(&Self) -> T) -> T {
        let _gate = self.inner.gate.lock();
        f(self)
    }
}
