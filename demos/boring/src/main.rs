//! A single generator: read a few messages, acknowledging each one so the
//! producer may continue, then walk away.
//!
//! Run with: cargo run --bin boring -- [count]

use rendezvous_concurrency::tasks::generator;
use rendezvous_rt::tasks as rt;
use std::env;

fn main() {
    let count: usize = env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(5);

    rt::run(async move {
        let mut joe = generator("Booooring!");

        for _ in 0..count {
            let Some(message) = joe.next().await else {
                break;
            };
            tracing::info!("You say: {:?}", message.payload());
            if let Err(e) = message.acknowledge() {
                tracing::error!("Could not acknowledge: {e}");
            }
        }
        tracing::info!("You're boring; I'm leaving.");
        // Dropping `joe` stops the generator.
    })
}
