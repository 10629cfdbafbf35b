//! The stateful shell around the pure core.
//!
//! A [`Store`] owns the single state slot. It is the only place where state
//! is replaced, and it does so synchronously: by the time `dispatch`
//! returns, the reducer has run and every subscriber has been notified.

mod container;
mod error;
mod subscription;

pub use container::{ReentrancyPolicy, Store};
pub use error::DispatchError;
pub use subscription::Subscription;

pub(crate) use container::StoreParts;
