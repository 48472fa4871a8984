use std::sync::Arc;

use rendezvous_rt::threads::{
    self as rt,
    rendezvous::{self, never, select, Receiver, Sender},
    CancellationToken,
};

use super::message::{Handoff, Message, MessageStream, QuitHandle, QuitRequest};
use crate::options::GeneratorOptions;

/// Spawns a generator thread with default options.
pub fn generator(label: impl Into<String>) -> MessageStream {
    Generator::new(GeneratorOptions::new(label)).start()
}

/// Spawns a quitable generator thread with default options.
pub fn quitable(label: impl Into<String>) -> (MessageStream, QuitHandle) {
    Generator::new(GeneratorOptions::new(label)).start_quitable()
}

#[derive(Debug, Clone)]
pub struct Generator {
    options: GeneratorOptions,
}

impl Generator {
    pub fn new(options: GeneratorOptions) -> Self {
        Self { options }
    }

    /// Same protocol as the tasks version: send, pause, wait for an
    /// acknowledgment, with cancellation observed at each of the three waits.
    pub fn start(self) -> MessageStream {
        let (tx, rx) = rendezvous::channel();
        let (handoff, acks) = Handoff::new();
        let cancellation_token = CancellationToken::new();
        let producer_token = cancellation_token.clone();
        let _join_handle = rt::spawn(move || produce(self.options, tx, handoff, acks, producer_token));
        MessageStream::new(rx, cancellation_token)
    }

    pub fn start_quitable(self) -> (MessageStream, QuitHandle) {
        let (tx, rx) = rendezvous::channel();
        let (quit_handle, quits) = QuitHandle::new();
        let cancellation_token = CancellationToken::new();
        let producer_token = cancellation_token.clone();
        let _join_handle =
            rt::spawn(move || produce_until_quit(self.options, tx, quits, producer_token));
        (MessageStream::new(rx, cancellation_token), quit_handle)
    }
}

/// Sleeps unless cancelled first. `false` means cancelled.
fn pause(options: &GeneratorOptions, cancelled: &Receiver<()>) -> bool {
    let timer = rendezvous::after(options.random_delay());
    select! {
        recv(timer) -> _ => true,
        recv(cancelled) -> _ => false,
    }
}

fn produce(
    options: GeneratorOptions,
    tx: Sender<Message>,
    handoff: Handoff,
    acks: Receiver<()>,
    token: CancellationToken,
) {
    let label: Arc<str> = options.label.as_str().into();
    let cancelled = token.cancelled();
    for index in 0u64.. {
        let message = Message::new(label.clone(), index, Some(handoff.clone()));
        select! {
            send(tx, message) -> sent => {
                if sent.is_err() {
                    tracing::debug!("{label}: consumer dropped the stream");
                    return;
                }
                tracing::trace!("{label}: sent message {index}");
            }
            recv(cancelled) -> _ => break,
        }
        if !pause(&options, &cancelled) {
            break;
        }
        select! {
            recv(acks) -> ack => {
                if ack.is_err() {
                    break;
                }
                tracing::trace!("{label}: message {index} acknowledged");
            }
            recv(cancelled) -> _ => break,
        }
    }
    tracing::debug!("{label}: generator cancelled");
}

fn produce_until_quit(
    options: GeneratorOptions,
    tx: Sender<Message>,
    quits: Receiver<QuitRequest>,
    token: CancellationToken,
) {
    let label: Arc<str> = options.label.as_str().into();
    let cancelled = token.cancelled();
    // Stands in for `quits` once the quit handle is gone without being used.
    let abandoned = never();
    let mut quit_handle_alive = true;
    let mut index = 0u64;
    loop {
        let message = Message::new(label.clone(), index, None);
        let requests = if quit_handle_alive { &quits } else { &abandoned };
        select! {
            send(tx, message) -> sent => {
                if sent.is_err() {
                    tracing::debug!("{label}: consumer dropped the stream");
                    return;
                }
                tracing::trace!("{label}: sent message {index}");
                index += 1;
            }
            recv(requests) -> request => match request {
                Ok(request) => {
                    tracing::debug!("{label}: asked to quit with {:?}", request.words);
                    if request.reply.send(options.farewell.clone()).is_err() {
                        tracing::trace!("{label}: quitter left before the farewell");
                    }
                    return;
                }
                Err(_) => {
                    tracing::trace!("{label}: quit handle dropped, producing until cancelled");
                    quit_handle_alive = false;
                    continue;
                }
            },
            recv(cancelled) -> _ => break,
        }
        if !pause(&options, &cancelled) {
            break;
        }
    }
    tracing::debug!("{label}: quitable generator cancelled");
}
