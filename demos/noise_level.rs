//! Noise Level
//!
//! This example walks through the basic store lifecycle.
//!
//! Key concepts:
//! - Creating a store from a reducer and its default state
//! - Dispatching plain-data actions
//! - Reading state and subscribing to changes
//! - Choosing what unknown actions do with `Fallback`
//!
//! Run with: cargo run --example noise_level

use tally::builder::table_reducer;
use tally::core::{Fallback, PlainAction};
use tally::middleware::TracingLogger;
use tally::StoreBuilder;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== Noise Level Example ===\n");

    // Unknown actions reset to the default level
    let store = StoreBuilder::new()
        .reducer(table_reducer(
            [("SCREAM", 10), ("SILENCE", 0), ("MURMUR", 5)],
            0,
            Fallback::Reset,
        ))
        .middleware(TracingLogger)
        .track_history()
        .build()
        .unwrap();

    println!("Initial level: {}", store.state());

    let display = store.clone();
    let subscription = store.subscribe(move || {
        println!("  Noise level: {}", display.state());
    });

    for kind in ["SCREAM", "SILENCE", "MURMUR", "BABBLE"] {
        println!("Dispatching {kind}");
        store.dispatch(PlainAction::new(kind)).unwrap();
    }

    subscription.unsubscribe();
    store.dispatch(PlainAction::new("SCREAM")).unwrap();
    println!("\nAfter unsubscribing, a silent SCREAM set the level to {}", store.state());

    if let Some(history) = store.history() {
        println!("Dispatched kinds: {:?}", history.kinds());
    }

    println!("\n=== Example Complete ===");
}
