//! Async Effects
//!
//! This example produces actions from effectful code and checkpoints the
//! resulting store.
//!
//! Key concepts:
//! - Stillwater effects as asynchronous action creators
//! - Effects read an injected environment
//! - Checkpoint to JSON and resume a new store from it
//!
//! Run with: cargo run --example async_effects

use stillwater::effect::BoxedEffect;
use stillwater::prelude::*;
use tally::checkpoint::Checkpoint;
use tally::core::{Fallback, PlainAction, ReducerError};
use tally::StoreBuilder;

#[derive(Clone)]
struct Microphone {
    decibels: u32,
}

fn listen() -> BoxedEffect<PlainAction, String, Microphone> {
    from_fn(|mic: &Microphone| match mic.decibels {
        0 => Err("microphone unplugged".to_string()),
        1..=40 => Ok(PlainAction::new("SILENCE")),
        41..=80 => Ok(PlainAction::new("MURMUR")),
        _ => Ok(PlainAction::new("SCREAM")),
    })
    .boxed()
}

fn noise(level: &u32, action: &PlainAction) -> Result<u32, ReducerError> {
    Ok(match action.kind.as_str() {
        "SCREAM" => 10,
        "SILENCE" => 0,
        "MURMUR" => 5,
        _ => Fallback::Preserve.apply(level, || 0),
    })
}

#[tokio::main]
async fn main() {
    println!("=== Async Effects Example ===\n");

    let store = StoreBuilder::new()
        .reducer(noise)
        .initial(0)
        .track_history()
        .build()
        .unwrap();

    for decibels in [95, 60, 0, 20] {
        let mic = Microphone { decibels };
        match store.dispatch_effect(listen(), &mic).await {
            Ok(action) => println!("{decibels} dB -> {} (level {})", action.kind, store.state()),
            Err(err) => println!("{decibels} dB -> {err}"),
        }
    }

    let json = store.checkpoint().to_json().unwrap();
    println!("\nCheckpoint:\n{json}");

    let resumed = StoreBuilder::new()
        .reducer(noise)
        .resume(Checkpoint::from_json(&json).unwrap())
        .build()
        .unwrap();
    println!(
        "\nResumed at level {} after {} dispatches",
        resumed.state(),
        resumed.dispatch_count()
    );

    println!("\n=== Example Complete ===");
}
