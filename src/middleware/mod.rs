//! Hooks that run around every reduction.
//!
//! Middleware sees each action before the reducer does and may halt it.
//! After a successful reduction it sees the previous and next state. Hooks
//! run in the order they were added to the [`StoreBuilder`](crate::builder::StoreBuilder).

mod guard;
mod logger;

pub use guard::ActionGuard;
pub use logger::TracingLogger;

use crate::core::Action;

/// Decision returned from [`Middleware::before`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Hand the action on to the next middleware and then the reducer
    Continue,

    /// Drop the action; the dispatch fails with `DispatchError::Halted`
    Halt,
}

/// Dispatch hook.
///
/// Both hooks default to doing nothing, so implementors override only what
/// they need.
///
/// # Example
///
/// ```rust
/// use tally::core::PlainAction;
/// use tally::middleware::{Flow, Middleware};
///
/// struct NoShouting;
///
/// impl Middleware<u8, PlainAction> for NoShouting {
///     fn name(&self) -> &str {
///         "no-shouting"
///     }
///
///     fn before(&self, action: &PlainAction, _state: &u8) -> Flow {
///         if action.kind == "SCREAM" {
///             Flow::Halt
///         } else {
///             Flow::Continue
///         }
///     }
/// }
///
/// assert_eq!(NoShouting.before(&PlainAction::new("SCREAM"), &0), Flow::Halt);
/// ```
pub trait Middleware<S, A: Action>: Send + Sync {
    /// Name reported in `DispatchError::Halted`.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Called before the reducer with the current state.
    fn before(&self, _action: &A, _state: &S) -> Flow {
        Flow::Continue
    }

    /// Called after the new state is installed, before subscribers run.
    fn after(&self, _action: &A, _previous: &S, _next: &S) {}
}
