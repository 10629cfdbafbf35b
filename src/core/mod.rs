//! Core state container types and logic.
//!
//! This module contains the pure part of the library:
//! - Actions via the `Action` trait and the schema-less `PlainAction`
//! - Reducers via the `Reducer` trait, `FnReducer` and the `Fallback` policy
//! - Immutable dispatch history
//!
//! Nothing in this module holds mutable state; the `store` module is the
//! only place where a state slot is replaced.

mod action;
mod history;
mod reducer;

pub use action::{Action, PlainAction};
pub use history::{DispatchHistory, DispatchRecord};
pub use reducer::{Fallback, FnReducer, Reducer, ReducerError};
