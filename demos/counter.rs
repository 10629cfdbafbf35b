//! Counter
//!
//! This example shows typed actions, failing reducers and nested dispatch.
//!
//! Key concepts:
//! - A hand-written `Action` enum carrying payloads
//! - A reducer error leaves the state untouched
//! - Dispatching from a subscriber is queued until the outer dispatch ends
//!
//! Run with: cargo run --example counter

use tally::core::{Action, ReducerError};
use tally::{DispatchError, Store};

#[derive(Clone, Debug)]
enum CounterAction {
    Increment,
    Add(i64),
    Divide(i64),
}

impl Action for CounterAction {
    fn kind(&self) -> &str {
        match self {
            Self::Increment => "INCREMENT",
            Self::Add(_) => "ADD",
            Self::Divide(_) => "DIVIDE",
        }
    }
}

fn counter(count: &i64, action: &CounterAction) -> Result<i64, ReducerError> {
    match action {
        CounterAction::Increment => Ok(count + 1),
        CounterAction::Add(n) => Ok(count + n),
        CounterAction::Divide(0) => Err(ReducerError::new("division by zero")),
        CounterAction::Divide(n) => Ok(count / n),
    }
}

fn main() {
    println!("=== Counter Example ===\n");

    let store = Store::new(counter, 0);

    // Bump to the next multiple of ten whenever the count lands on 7
    let handle = store.clone();
    store.subscribe(move || {
        let count = *handle.state();
        println!("  count = {count}");
        if count == 7 {
            handle.dispatch(CounterAction::Add(3)).unwrap();
        }
    });

    store.dispatch(CounterAction::Add(6)).unwrap();
    store.dispatch(CounterAction::Increment).unwrap();
    println!("After nested dispatch: {}", store.state());

    match store.dispatch(CounterAction::Divide(0)) {
        Err(DispatchError::Reducer { kind, source }) => {
            println!("Dispatch of {kind} failed ({source}); count is still {}", store.state());
        }
        other => println!("Unexpected outcome: {other:?}"),
    }

    store.dispatch(CounterAction::Divide(2)).unwrap();
    println!("Final count: {}", store.state());

    println!("\n=== Example Complete ===");
}
