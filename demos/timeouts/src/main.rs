//! Two ways of losing patience with a generator.
//!
//! - `overall`: the whole conversation is capped (3 s by default)
//! - `message`: every single message must arrive in time (800 ms by default)
//!
//! Run with: cargo run --bin timeouts -- [overall|message] [millis]

use rendezvous_concurrency::tasks::{generator, Message, MessageTimeout, OverallTimeout};
use rendezvous_concurrency::StopReason;
use rendezvous_rt::tasks as rt;
use std::{env, time::Duration};

fn main() {
    let mode = env::args().nth(1).unwrap_or_else(|| "overall".to_string());
    let millis: Option<u64> = env::args().nth(2).and_then(|arg| arg.parse().ok());

    rt::run(async move {
        let mut joe = generator("Joe");
        let print = |message: &Message| {
            tracing::info!("{message}");
        };

        let report = match mode.as_str() {
            "message" => {
                let patience = Duration::from_millis(millis.unwrap_or(800));
                MessageTimeout::new(&mut joe, patience).drain(print).await
            }
            _ => {
                let limit = Duration::from_millis(millis.unwrap_or(3000));
                OverallTimeout::new(&mut joe, limit).drain(print).await
            }
        };

        match report.stop {
            StopReason::DeadlineElapsed => tracing::info!("You talk too much."),
            StopReason::MessageTimeout => tracing::info!("You're too slow."),
            StopReason::Closed => tracing::info!("Joe left."),
        }
        tracing::info!("Heard {} messages", report.received);
        // The timeout only stopped us; dropping the stream stops Joe.
        drop(joe);
    })
}
