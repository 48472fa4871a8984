//! Quit signal: listen for a random number of messages, then ask the
//! generator to stop and print its last words.
//!
//! Run with: cargo run --bin quit

use rand::Rng as _;
use rendezvous_concurrency::tasks::quitable;
use rendezvous_rt::tasks as rt;

fn main() {
    rt::run(async {
        let (mut joe, quit) = quitable("Joe");

        let count = rand::rng().random_range(1..=10);
        for _ in 0..count {
            match joe.next().await {
                Some(message) => tracing::info!("{message}"),
                None => break,
            }
        }

        match quit.quit("Terminating...").await {
            Ok(last_words) => tracing::info!("Joe last words are: {last_words:?}"),
            Err(e) => tracing::error!("Joe did not answer: {e}"),
        }
    })
}
