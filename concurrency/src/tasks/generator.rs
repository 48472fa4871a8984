use core::pin::pin;
use std::sync::Arc;

use futures::future::{select, Either};
use rendezvous_rt::tasks::{self as rt, mpsc, rendezvous, CancellationToken};

use super::message::{Handoff, Message, MessageStream, QuitHandle, QuitRequest};
use super::until_cancelled;
use crate::options::GeneratorOptions;

/// Spawns a generator with default options. See [`Generator::start`].
pub fn generator(label: impl Into<String>) -> MessageStream {
    Generator::new(GeneratorOptions::new(label)).start()
}

/// Spawns a quitable generator with default options. See
/// [`Generator::start_quitable`].
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

    /// Spawns the producer and returns its stream.
    ///
    /// The producer emits `"{label} 0"`, `"{label} 1"`, ... For each message it
    /// waits for a receiver, pauses for a random delay and then waits for an
    /// acknowledgment before building the next one.
    pub fn start(self) -> MessageStream {
        let (tx, rx) = rendezvous::channel();
        let (handoff, acks) = Handoff::new();
        let cancellation_token = CancellationToken::new();
        let producer_token = cancellation_token.clone();
        // Ignore the JoinHandle: the token is how the producer gets stopped.
        let _join_handle = rt::spawn(async move {
            produce(self.options, tx, handoff, acks, producer_token).await;
        });
        MessageStream::new(rx, cancellation_token)
    }

    /// Spawns a producer that can be asked to stop through the returned
    /// [`QuitHandle`]. Its messages carry no hand-off: each send races the
    /// quit request instead.
    pub fn start_quitable(self) -> (MessageStream, QuitHandle) {
        let (tx, rx) = rendezvous::channel();
        let (quit_handle, quits) = QuitHandle::new();
        let cancellation_token = CancellationToken::new();
        let producer_token = cancellation_token.clone();
        let _join_handle = rt::spawn(async move {
            produce_until_quit(self.options, tx, quits, producer_token).await;
        });
        (MessageStream::new(rx, cancellation_token), quit_handle)
    }
}

async fn produce(
    options: GeneratorOptions,
    tx: rendezvous::Sender<Message>,
    handoff: Handoff,
    mut acks: mpsc::Receiver<()>,
    token: CancellationToken,
) {
    let label: Arc<str> = options.label.as_str().into();
    for index in 0u64.. {
        let message = Message::new(label.clone(), index, Some(handoff.clone()));
        match until_cancelled(&token, tx.send(message)).await {
            Some(Ok(())) => tracing::trace!("{label}: sent message {index}"),
            Some(Err(_)) => {
                tracing::debug!("{label}: consumer dropped the stream");
                return;
            }
            None => break,
        }
        if until_cancelled(&token, rt::sleep(options.random_delay()))
            .await
            .is_none()
        {
            break;
        }
        match until_cancelled(&token, acks.recv()).await {
            Some(Some(())) => tracing::trace!("{label}: message {index} acknowledged"),
            Some(None) | None => break,
        }
    }
    tracing::debug!("{label}: generator cancelled");
}

enum Step {
    Sent(bool),
    Quit(Option<QuitRequest>),
}

async fn produce_until_quit(
    options: GeneratorOptions,
    tx: rendezvous::Sender<Message>,
    quits: mpsc::Receiver<QuitRequest>,
    token: CancellationToken,
) {
    let label: Arc<str> = options.label.as_str().into();
    // Dropped once the quit handle is gone without being used.
    let mut quits = Some(quits);
    let mut index = 0u64;
    loop {
        let message = Message::new(label.clone(), index, None);
        let step = match quits.as_mut() {
            Some(requests) => {
                let send = pin!(tx.send(message));
                let quit = pin!(requests.recv());
                until_cancelled(&token, async move {
                    match select(send, quit).await {
                        Either::Left((sent, _)) => Step::Sent(sent.is_ok()),
                        Either::Right((request, _)) => Step::Quit(request),
                    }
                })
                .await
            }
            None => until_cancelled(&token, tx.send(message))
                .await
                .map(|sent| Step::Sent(sent.is_ok())),
        };

        match step {
            Some(Step::Sent(true)) => {
                tracing::trace!("{label}: sent message {index}");
                index += 1;
            }
            Some(Step::Sent(false)) => {
                tracing::debug!("{label}: consumer dropped the stream");
                return;
            }
            Some(Step::Quit(Some(request))) => {
                tracing::debug!("{label}: asked to quit with {:?}", request.words);
                if request.reply.send(options.farewell.clone()).is_err() {
                    tracing::trace!("{label}: quitter left before the farewell");
                }
                return;
            }
            Some(Step::Quit(None)) => {
                tracing::trace!("{label}: quit handle dropped, producing until cancelled");
                quits = None;
                continue;
            }
            None => break,
        }

        if until_cancelled(&token, rt::sleep(options.random_delay()))
            .await
            .is_none()
        {
            break;
        }
    }
    tracing::debug!("{label}: quitable generator cancelled");
}
