//! Runtime tasks-based streams: every producer and forwarder is a tokio task.

mod fan_in;
mod generator;
mod message;
mod timeout;

#[cfg(test)]
mod fan_in_tests;

pub use fan_in::{fan_in, fan_in_all};
pub use generator::{generator, quitable, Generator};
pub use message::{Handoff, Message, MessageStream, QuitHandle};
pub use timeout::{MessageTimeout, OverallTimeout};

use core::pin::pin;
use futures::future::{select, Either};
use rendezvous_rt::tasks::CancellationToken;
use std::future::Future;

/// Runs `fut` unless `token` fires first, in which case `fut` is dropped and
/// `None` is returned.
pub(crate) async fn until_cancelled<F: Future>(
    token: &CancellationToken,
    fut: F,
) -> Option<F::Output> {
    let cancelled = pin!(token.cancelled());
    let fut = pin!(fut);
    match select(cancelled, fut).await {
        Either::Left(_) => None,
        Either::Right((output, _)) => Some(output),
    }
}
