use std::{
    fmt::Display,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use futures::stream::{self, BoxStream, StreamExt as _};
use rendezvous_rt::tasks::{mpsc, oneshot, rendezvous, CancellationToken};

use crate::error::StreamError;

/// Acknowledgment side of a generator's hand-off channel.
///
/// One hand-off exists per generator; every message it emits carries a clone,
/// so acknowledging any of them releases the next production step.
#[derive(Clone, Debug)]
pub struct Handoff {
    tx: mpsc::Sender<()>,
}

impl Handoff {
    pub(crate) fn new() -> (Self, mpsc::Receiver<()>) {
        let (tx, rx) = mpsc::channel(1);
        (Self { tx }, rx)
    }

    /// Releases one production step. Calls made while the producer is not
    /// waiting are banked (at most one), so a call that follows an already
    /// consumed acknowledgment lets the next message through early.
    /// [`Message::acknowledge`] only ever releases one step per message.
    pub fn acknowledge(&self) -> Result<(), StreamError> {
        match self.tx.try_send(()) {
            Ok(()) | Err(mpsc::error::TrySendError::Full(())) => Ok(()),
            Err(mpsc::error::TrySendError::Closed(())) => Err(StreamError::ProducerGone),
        }
    }
}

/// One produced value: `"{label} {index}"`.
#[derive(Clone, Debug)]
pub struct Message {
    label: Arc<str>,
    index: u64,
    payload: String,
    handoff: Option<Handoff>,
    acknowledged: Arc<AtomicBool>,
}

impl Message {
    pub(crate) fn new(label: Arc<str>, index: u64, handoff: Option<Handoff>) -> Self {
        let payload = format!("{label} {index}");
        Self {
            label,
            index,
            payload,
            handoff,
            acknowledged: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn index(&self) -> u64 {
        self.index
    }

    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// The producer's hand-off, `None` for quitable generators which do not
    /// wait for acknowledgments.
    pub fn handoff(&self) -> Option<&Handoff> {
        self.handoff.as_ref()
    }

    /// Acknowledges through the hand-off of the producer that emitted this
    /// message. Only the first call for a message (or any of its clones)
    /// reaches the producer; later ones, and messages without a hand-off,
    /// are no-ops.
    pub fn acknowledge(&self) -> Result<(), StreamError> {
        let Some(handoff) = &self.handoff else {
            return Ok(());
        };
        if self.acknowledged.swap(true, Ordering::AcqRel) {
            return Ok(());
        }
        handoff.acknowledge().inspect_err(|_| {
            self.acknowledged.store(false, Ordering::Release);
        })
    }
}

impl Display for Message {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.payload)
    }
}

/// Receive end of a producer (or of a fan-in).
///
/// Dropping the stream cancels the workers feeding it.
#[derive(Debug)]
pub struct MessageStream {
    rx: rendezvous::Receiver<Message>,
    cancellation_token: CancellationToken,
}

impl MessageStream {
    pub(crate) fn new(
        rx: rendezvous::Receiver<Message>,
        cancellation_token: CancellationToken,
    ) -> Self {
        Self {
            rx,
            cancellation_token,
        }
    }

    /// Waits for the next message. `None` once the producers have stopped or
    /// the stream was cancelled.
    ///
    /// Cancel-safe: if the returned future is dropped before completing, no
    /// message is lost.
    pub async fn next(&mut self) -> Option<Message> {
        if self.cancellation_token.is_cancelled() {
            return None;
        }
        self.rx.recv().await
    }

    /// Stops the workers feeding this stream at their next suspension point.
    pub fn cancel(&self) {
        self.cancellation_token.cancel();
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancellation_token.clone()
    }

    pub fn into_stream(self) -> BoxStream<'static, Message> {
        stream::unfold(self, |mut source| async move {
            let message = source.next().await?;
            Some((message, source))
        })
        .boxed()
    }
}

impl Drop for MessageStream {
    fn drop(&mut self) {
        self.cancellation_token.cancel();
    }
}

pub(crate) struct QuitRequest {
    pub(crate) words: String,
    pub(crate) reply: oneshot::Sender<String>,
}

/// Control half of a quitable generator, used once.
#[derive(Debug)]
pub struct QuitHandle {
    tx: mpsc::Sender<QuitRequest>,
}

impl QuitHandle {
    pub(crate) fn new() -> (Self, mpsc::Receiver<QuitRequest>) {
        let (tx, rx) = mpsc::channel(1);
        (Self { tx }, rx)
    }

    /// Asks the producer to stop and waits for its farewell. Once this
    /// returns, the stream yields no further messages.
    pub async fn quit(self, words: impl Into<String>) -> Result<String, StreamError> {
        let (reply, farewell) = oneshot::channel();
        let request = QuitRequest {
            words: words.into(),
            reply,
        };
        self.tx
            .send(request)
            .await
            .map_err(|_| StreamError::ProducerGone)?;
        farewell.await.map_err(|_| StreamError::ProducerGone)
    }
}
