//! Build errors for the store builder.

use thiserror::Error;

/// Errors that can occur when building a store.
#[derive(Debug, Error, PartialEq)]
pub enum BuildError {
    #[error("Reducer not specified. Call .reducer(reducer) before .build()")]
    MissingReducer,

    #[error(
        "Initial state not specified and the reducer declares no default. \
         Call .initial(state) or give the reducer a default state"
    )]
    MissingInitialState,
}
