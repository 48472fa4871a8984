use rendezvous_rt::threads::{
    self as rt,
    rendezvous::{self, select, Receiver, Select, Sender},
    CancellationToken,
};

use super::message::{Message, MessageStream};

/// Merges two streams with one forwarding thread per source.
pub fn fan_in(first: MessageStream, second: MessageStream) -> MessageStream {
    let (tx, rx) = rendezvous::channel();
    let cancellation_token = CancellationToken::new();
    for source in [first, second] {
        let tx = tx.clone();
        let token = cancellation_token.clone();
        let _join_handle = rt::spawn(move || forward(source, tx, token));
    }
    MessageStream::new(rx, cancellation_token)
}

fn forward(source: MessageStream, tx: Sender<Message>, token: CancellationToken) {
    let cancelled = token.cancelled();
    loop {
        let message = select! {
            recv(source.receiver()) -> message => match message {
                Ok(message) => message,
                Err(_) => break,
            },
            recv(cancelled) -> _ => break,
        };
        if !send_or_cancel(&tx, message, &cancelled) {
            break;
        }
    }
    tracing::trace!("Fan-in forwarder stopped");
}

/// Forwards one message. `false` when the output is gone or cancelled.
fn send_or_cancel(tx: &Sender<Message>, message: Message, cancelled: &Receiver<()>) -> bool {
    select! {
        send(tx, message) -> sent => sent.is_ok(),
        recv(cancelled) -> _ => false,
    }
}

enum Ready {
    Message(Message),
    Closed(usize),
    Cancelled,
}

/// Merges any number of streams with a single thread blocked on all of them
/// at once. When several sources are ready the choice among them is random,
/// so none is starved.
pub fn fan_in_all(sources: Vec<MessageStream>) -> MessageStream {
    let (tx, rx) = rendezvous::channel();
    let cancellation_token = CancellationToken::new();
    let token = cancellation_token.clone();
    let _join_handle = rt::spawn(move || {
        let mut sources = sources;
        let cancelled = token.cancelled();
        while !sources.is_empty() {
            let ready = {
                let mut select = Select::new();
                for source in &sources {
                    select.recv(source.receiver());
                }
                let cancel_index = select.recv(&cancelled);
                let operation = select.select();
                let index = operation.index();
                if index == cancel_index {
                    let _ = operation.recv(&cancelled);
                    Ready::Cancelled
                } else {
                    match operation.recv(sources[index].receiver()) {
                        Ok(message) => Ready::Message(message),
                        Err(_) => Ready::Closed(index),
                    }
                }
            };
            match ready {
                Ready::Message(message) => {
                    if !send_or_cancel(&tx, message, &cancelled) {
                        break;
                    }
                }
                Ready::Closed(index) => {
                    tracing::trace!("Fan-in source {index} closed");
                    sources.swap_remove(index);
                }
                Ready::Cancelled => break,
            }
        }
        tracing::trace!("Select fan-in stopped");
    });
    MessageStream::new(rx, cancellation_token)
}
