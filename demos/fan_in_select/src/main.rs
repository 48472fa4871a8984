//! Select-based fan-in: one worker waits on three generators at once.
//!
//! Run with: cargo run --bin fan_in_select

use rendezvous_concurrency::tasks::{fan_in_all, generator, Message};
use rendezvous_rt::tasks as rt;

fn main() {
    rt::run(async {
        let mut everyone = fan_in_all(vec![generator("Joe"), generator("Ann"), generator("Karl")]);

        for round in 0..5 {
            let mut batch: Vec<Message> = Vec::with_capacity(3);
            while batch.len() < 3 {
                match everyone.next().await {
                    Some(message) => batch.push(message),
                    None => return,
                }
            }
            for message in &batch {
                tracing::info!("round {round}: {message}");
            }
            for message in &batch {
                if let Err(e) = message.acknowledge() {
                    tracing::error!("Could not acknowledge {message}: {e}");
                }
            }
        }
        tracing::info!("You're all boring; I'm leaving.");
    })
}
