//! Tally: a unidirectional state container
//!
//! Tally keeps one state value behind a controlled protocol. The state is
//! only ever replaced, never mutated: a pure reducer turns the current state
//! and a plain-data action into the next state, and the store notifies its
//! subscribers once the new state is in place.
//!
//! # Core Concepts
//!
//! - **Action**: immutable description of an intended change, tagged with a kind
//! - **Reducer**: pure function `(state, action) -> state`
//! - **Store**: owns the state slot; `dispatch`, `state`, `subscribe`
//! - **Subscriber**: zero-argument callback run after every successful dispatch
//!
//! # Example
//!
//! ```rust
//! use tally::core::{Fallback, PlainAction, ReducerError};
//! use tally::Store;
//!
//! fn noise(level: &u8, action: &PlainAction) -> Result<u8, ReducerError> {
//!     Ok(match action.kind.as_str() {
//!         "SCREAM" => 10,
//!         "SILENCE" => 0,
//!         "MURMUR" => 5,
//!         _ => Fallback::Preserve.apply(level, || 0),
//!     })
//! }
//!
//! let store = Store::new(noise, 0);
//! store.dispatch(PlainAction::new("SCREAM")).unwrap();
//! store.dispatch(PlainAction::new("MURMUR")).unwrap();
//! store.dispatch(PlainAction::new("BABBLE")).unwrap();
//!
//! assert_eq!(*store.state(), 5);
//! ```

pub mod builder;
pub mod checkpoint;
pub mod core;
pub mod effects;
pub mod middleware;
pub mod store;

// Re-export commonly used types
pub use builder::StoreBuilder;
pub use crate::core::{Action, Fallback, PlainAction, Reducer, ReducerError};
pub use store::{DispatchError, ReentrancyPolicy, Store, Subscription};
