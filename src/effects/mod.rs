//! Asynchronous action creators using Stillwater effects.
//!
//! Reducers stay pure and dispatch stays synchronous. Work that has to wait
//! on the outside world (I/O, timers, remote calls) is expressed as a
//! Stillwater `Effect` whose output is an action; the store runs the effect
//! against an environment and dispatches whatever it produces.
//!
//! # Example
//!
//! ```rust
//! use tally::core::{PlainAction, ReducerError};
//! use tally::Store;
//! use stillwater::effect::BoxedEffect;
//! use stillwater::prelude::*;
//!
//! #[derive(Clone)]
//! struct Microphone {
//!     decibels: u32,
//! }
//!
//! fn listen() -> BoxedEffect<PlainAction, String, Microphone> {
//!     from_fn(|mic: &Microphone| {
//!         Ok(if mic.decibels > 80 {
//!             PlainAction::new("SCREAM")
//!         } else {
//!             PlainAction::new("MURMUR")
//!         })
//!     })
//!     .boxed()
//! }
//!
//! let store = Store::new(
//!     |_: &u32, action: &PlainAction| -> Result<u32, ReducerError> {
//!         Ok(if action.kind == "SCREAM" { 10 } else { 5 })
//!     },
//!     0,
//! );
//!
//! let runtime = tokio::runtime::Runtime::new().unwrap();
//! runtime
//!     .block_on(store.dispatch_effect(listen(), &Microphone { decibels: 95 }))
//!     .unwrap();
//! assert_eq!(*store.state(), 10);
//! ```

use crate::core::Action;
use crate::store::{DispatchError, Store};
use std::fmt::Display;
use stillwater::effect::Effect;

impl<S, A> Store<S, A>
where
    S: Send + Sync + 'static,
    A: Action,
{
    /// Run `effect` against `env` and dispatch the action it produces.
    ///
    /// If the effect fails the store is not touched and the failure is
    /// reported as `DispatchError::Effect`. Otherwise this behaves exactly
    /// like [`Store::dispatch`].
    pub async fn dispatch_effect<E>(&self, effect: E, env: &E::Env) -> Result<A, DispatchError>
    where
        E: Effect<Output = A>,
        E::Error: Display,
    {
        let action = effect.run(env).await.map_err(|err| {
            tracing::debug!(error = %err, "Action effect failed");
            DispatchError::Effect(err.to_string())
        })?;
        self.dispatch(action)
    }
}

#[cfg(test)]
mod tests {
    use crate::core::{PlainAction, ReducerError};
    use crate::store::{DispatchError, Store};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use stillwater::effect::BoxedEffect;
    use stillwater::prelude::*;

    #[derive(Clone)]
    struct TestEnv {
        online: bool,
    }

    fn noise(state: &i32, action: &PlainAction) -> Result<i32, ReducerError> {
        match action.kind.as_str() {
            "SCREAM" => Ok(10),
            "MURMUR" => Ok(5),
            _ => Ok(*state),
        }
    }

    fn scream() -> BoxedEffect<PlainAction, String, TestEnv> {
        pure(PlainAction::new("SCREAM")).boxed()
    }

    fn poll_sensor() -> BoxedEffect<PlainAction, String, TestEnv> {
        from_fn(|env: &TestEnv| {
            if env.online {
                Ok(PlainAction::new("MURMUR"))
            } else {
                Err("sensor offline".to_string())
            }
        })
        .boxed()
    }

    #[tokio::test]
    async fn pure_effect_is_dispatched() {
        let store = Store::new(noise, 0);
        let env = TestEnv { online: true };

        let action = store.dispatch_effect(scream(), &env).await.unwrap();

        assert_eq!(action.kind, "SCREAM");
        assert_eq!(*store.state(), 10);
    }

    #[tokio::test]
    async fn effect_reads_environment() {
        let store = Store::new(noise, 0);
        let env = TestEnv { online: true };

        store.dispatch_effect(poll_sensor(), &env).await.unwrap();

        assert_eq!(*store.state(), 5);
    }

    #[tokio::test]
    async fn failed_effect_leaves_store_untouched() {
        let store = Store::new(noise, 3);
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        store.subscribe(move || {
            seen.fetch_add(1, Ordering::SeqCst);
        });
        let env = TestEnv { online: false };

        let err = store.dispatch_effect(poll_sensor(), &env).await.unwrap_err();

        assert_eq!(err, DispatchError::Effect("sensor offline".to_string()));
        assert_eq!(*store.state(), 3);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(store.dispatch_count(), 0);
    }
}
