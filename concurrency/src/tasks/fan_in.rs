use futures::{stream, StreamExt as _};
use rendezvous_rt::tasks::{self as rt, rendezvous, CancellationToken};

use super::message::{Message, MessageStream};
use super::until_cancelled;

/// Merges two streams with one forwarding task per source.
///
/// Both forwarders compete for the output, so the interleaving is whatever the
/// scheduler decides. Messages (and their hand-offs) are forwarded untouched.
pub fn fan_in(first: MessageStream, second: MessageStream) -> MessageStream {
    let (tx, rx) = rendezvous::channel();
    let cancellation_token = CancellationToken::new();
    for source in [first, second] {
        let tx = tx.clone();
        let token = cancellation_token.clone();
        let _join_handle = rt::spawn(async move {
            forward(source, tx, token).await;
        });
    }
    MessageStream::new(rx, cancellation_token)
}

async fn forward(
    mut source: MessageStream,
    tx: rendezvous::Sender<Message>,
    token: CancellationToken,
) {
    while let Some(Some(message)) = until_cancelled(&token, source.next()).await {
        match until_cancelled(&token, tx.send(message)).await {
            Some(Ok(())) => {}
            Some(Err(_)) | None => break,
        }
    }
    // Dropping `source` here cancels its producer.
    tracing::trace!("Fan-in forwarder stopped");
}

/// Merges any number of streams with a single task.
///
/// Each round waits on every source at once and forwards whichever is ready.
/// Sources are polled in turn so a ready source is not starved by a busy one.
/// Closed sources are removed; the output closes when none remain.
pub fn fan_in_all(sources: Vec<MessageStream>) -> MessageStream {
    let (tx, rx) = rendezvous::channel();
    let cancellation_token = CancellationToken::new();
    let token = cancellation_token.clone();
    let mut merged = stream::select_all(sources.into_iter().map(MessageStream::into_stream));
    let _join_handle = rt::spawn(async move {
        while let Some(Some(message)) = until_cancelled(&token, merged.next()).await {
            match until_cancelled(&token, tx.send(message)).await {
                Some(Ok(())) => {}
                Some(Err(_)) | None => break,
            }
        }
        tracing::trace!("Select fan-in stopped");
    });
    MessageStream::new(rx, cancellation_token)
}
