use std::{
    fmt::Display,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use rendezvous_rt::threads::{
    rendezvous::{self, Receiver, Sender, TrySendError},
    CancellationToken,
};

use crate::error::StreamError;

/// Acknowledgment side of a generator's hand-off channel, shared by every
/// message the generator emits.
#[derive(Clone, Debug)]
pub struct Handoff {
    tx: Sender<()>,
}

impl Handoff {
    pub(crate) fn new() -> (Self, Receiver<()>) {
        let (tx, rx) = rendezvous::bounded(1);
        (Self { tx }, rx)
    }

    /// Releases one production step. Calls made while the producer is not
    /// waiting are banked (at most one), so a call that follows an already
    /// consumed acknowledgment lets the next message through early.
    /// [`Message::acknowledge`] only ever releases one step per message.
    pub fn acknowledge(&self) -> Result<(), StreamError> {
        match self.tx.try_send(()) {
            Ok(()) | Err(TrySendError::Full(())) => Ok(()),
            Err(TrySendError::Disconnected(())) => Err(StreamError::ProducerGone),
        }
    }
}

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

/// Receive end of a producer (or of a fan-in). Iterating blocks the current
/// thread; dropping the stream cancels the workers feeding it.
#[derive(Debug)]
pub struct MessageStream {
    rx: Receiver<Message>,
    cancellation_token: CancellationToken,
}

impl MessageStream {
    pub(crate) fn new(rx: Receiver<Message>, cancellation_token: CancellationToken) -> Self {
        Self {
            rx,
            cancellation_token,
        }
    }

    pub(crate) fn receiver(&self) -> &Receiver<Message> {
        &self.rx
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancellation_token.is_cancelled()
    }

    pub fn cancel(&self) {
        self.cancellation_token.cancel();
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancellation_token.clone()
    }
}

impl Iterator for MessageStream {
    type Item = Message;

    /// Blocks until the next message. `None` once the producers have stopped
    /// or the stream was cancelled.
    fn next(&mut self) -> Option<Message> {
        if self.is_cancelled() {
            return None;
        }
        self.rx.recv().ok()
    }
}

impl Drop for MessageStream {
    fn drop(&mut self) {
        self.cancellation_token.cancel();
    }
}

pub(crate) struct QuitRequest {
    pub(crate) words: String,
    pub(crate) reply: Sender<String>,
}

/// Control half of a quitable generator, used once.
#[derive(Debug)]
pub struct QuitHandle {
    tx: Sender<QuitRequest>,
}

impl QuitHandle {
    pub(crate) fn new() -> (Self, Receiver<QuitRequest>) {
        let (tx, rx) = rendezvous::channel();
        (Self { tx }, rx)
    }

    /// Blocks until the producer takes the request, then returns its farewell.
    /// Once this returns, the stream yields no further messages.
    pub fn quit(self, words: impl Into<String>) -> Result<String, StreamError> {
        let (reply, farewell) = rendezvous::bounded(1);
        let request = QuitRequest {
            words: words.into(),
            reply,
        };
        self.tx
            .send(request)
            .map_err(|_| StreamError::ProducerGone)?;
        farewell.recv().map_err(|_| StreamError::ProducerGone)
    }
}
