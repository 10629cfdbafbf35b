//! Dispatch errors.

use crate::core::ReducerError;
use thiserror::Error;

/// Errors that can occur while dispatching an action.
///
/// In every case the store's state is left as it was before the failed
/// dispatch and no subscriber is notified for it. An action kind the reducer
/// does not recognize is not an error.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DispatchError {
    #[error("Reducer failed on action '{kind}': {source}")]
    Reducer {
        kind: String,
        #[source]
        source: ReducerError,
    },

    #[error("Action '{kind}' halted by middleware '{middleware}'")]
    Halted { kind: String, middleware: String },

    #[error("Nested dispatch of '{kind}' rejected while another dispatch is running")]
    Reentrant { kind: String },

    #[error("Action effect failed: {0}")]
    Effect(String),
}

impl DispatchError {
    /// Kind tag of the action that failed, when one was produced.
    pub fn kind(&self) -> Option<&str> {
        match self {
            Self::Reducer { kind, .. } | Self::Halted { kind, .. } | Self::Reentrant { kind } => {
                Some(kind)
            }
            Self::Effect(_) => None,
        }
    }
}
