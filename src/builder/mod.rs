//! Builder API for ergonomic store construction.
//!
//! This module provides a fluent builder for stores and a macro for
//! declaring action enums with minimal boilerplate.

pub mod error;
pub mod macros;
pub mod store;

pub use error::BuildError;
pub use store::StoreBuilder;

use crate::core::{Action, Fallback, FnReducer};
use std::collections::HashMap;

/// Build a table-driven reducer for states that are plain values.
///
/// Each listed kind maps to a fixed state. Kinds not in the table are
/// resolved with `fallback` against `default`, which is also the reducer's
/// default state.
///
/// # Example
///
/// ```
/// use tally::builder::table_reducer;
/// use tally::core::{Fallback, PlainAction, Reducer};
///
/// let reducer = table_reducer([("SCREAM", 10), ("SILENCE", 0)], 0, Fallback::Preserve);
///
/// assert_eq!(reducer.reduce(&3, &PlainAction::new("SCREAM")), Ok(10));
/// assert_eq!(reducer.reduce(&3, &PlainAction::new("WHISTLE")), Ok(3));
/// assert_eq!(reducer.default_state(), Some(0));
/// ```
pub fn table_reducer<S, A, I, K>(table: I, default: S, fallback: Fallback) -> FnReducer<S, A>
where
    S: Clone + Send + Sync + 'static,
    A: Action,
    I: IntoIterator<Item = (K, S)>,
    K: Into<String>,
{
    let table: HashMap<String, S> = table.into_iter().map(|(k, s)| (k.into(), s)).collect();
    let reset_to = default.clone();
    FnReducer::new(move |state: &S, action: &A| match table.get(action.kind()) {
        Some(next) => next.clone(),
        None => fallback.apply(state, || reset_to.clone()),
    })
    .with_default(default)
}
