//! Middleware that reports every dispatch through `tracing`.

use super::{Flow, Middleware};
use crate::core::Action;
use std::fmt::Debug;

/// Logs each action at `debug` and the before/after states at `trace`.
///
/// Never halts a dispatch.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl<S: Debug, A: Action> Middleware<S, A> for TracingLogger {
    fn name(&self) -> &str {
        "tracing-logger"
    }

    fn before(&self, action: &A, _state: &S) -> Flow {
        tracing::debug!(kind = action.kind(), ?action, "Dispatching action");
        Flow::Continue
    }

    fn after(&self, action: &A, previous: &S, next: &S) {
        tracing::trace!(kind = action.kind(), ?previous, ?next, "State replaced");
    }
}
