//! Restoring sequencing through fan-in: both generators write into one
//! stream, and each waits for its own message to be acknowledged before
//! speaking again, so the two alternate.
//!
//! Run with: cargo run --bin ordering

use rendezvous_concurrency::tasks::{fan_in, generator};
use rendezvous_rt::tasks as rt;

fn main() {
    rt::run(async {
        let mut both = fan_in(generator("Joe"), generator("Ann"));

        for _ in 0..5 {
            let (Some(first), Some(second)) = (both.next().await, both.next().await) else {
                break;
            };
            tracing::info!("{first}");
            tracing::info!("{second}");
            for message in [first, second] {
                if let Err(e) = message.acknowledge() {
                    tracing::error!("Could not acknowledge {message}: {e}");
                }
            }
        }
        tracing::info!("You're both boring; I'm leaving.");
    })
}
