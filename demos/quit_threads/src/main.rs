//! Quit signal, threads version.
//!
//! Run with: cargo run --bin quit_threads

use rand::Rng as _;
use rendezvous_concurrency::threads::quitable;
use rendezvous_rt::threads as rt;

fn main() {
    rt::run(|| {
        let (mut joe, quit) = quitable("Joe");

        let count = rand::rng().random_range(1..=10);
        for message in joe.by_ref().take(count) {
            tracing::info!("{message}");
        }

        match quit.quit("Terminating...") {
            Ok(last_words) => tracing::info!("Joe last words are: {last_words:?}"),
            Err(e) => tracing::error!("Joe did not answer: {e}"),
        }
    })
}
