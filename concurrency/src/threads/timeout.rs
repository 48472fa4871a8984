use std::time::{Duration, Instant};

use rendezvous_rt::threads::rendezvous::RecvTimeoutError;

use super::message::{Message, MessageStream};
use crate::drain::{DrainReport, StopReason};
use crate::error::StreamError;

/// Bounds the whole time spent consuming a stream; the deadline is armed once.
/// `None` when the duration does not fit in an instant, which waits forever.
#[derive(Debug)]
pub struct OverallTimeout<'a> {
    stream: &'a mut MessageStream,
    deadline: Option<Instant>,
}

impl<'a> OverallTimeout<'a> {
    pub fn new(stream: &'a mut MessageStream, duration: Duration) -> Self {
        Self {
            stream,
            deadline: Instant::now().checked_add(duration),
        }
    }

    pub fn next(&mut self) -> Result<Option<Message>, StreamError> {
        let Some(deadline) = self.deadline else {
            return Ok(self.stream.next());
        };
        if self.stream.is_cancelled() {
            return Ok(None);
        }
        match self.stream.receiver().recv_deadline(deadline) {
            Ok(message) => Ok(Some(message)),
            Err(RecvTimeoutError::Timeout) => Err(StreamError::DeadlineElapsed),
            Err(RecvTimeoutError::Disconnected) => Ok(None),
        }
    }

    pub fn drain(mut self, mut on_message: impl FnMut(&Message)) -> DrainReport {
        let mut received = 0;
        let stop = loop {
            match self.next() {
                Ok(Some(message)) => {
                    on_message(&message);
                    received += 1;
                    if let Err(e) = message.acknowledge() {
                        tracing::trace!("Acknowledgment not delivered: {e}");
                    }
                }
                Ok(None) => break StopReason::Closed,
                Err(_) => break StopReason::DeadlineElapsed,
            }
        };
        DrainReport { received, stop }
    }
}

/// Bounds the wait for each message; the timer restarts on every receive.
#[derive(Debug)]
pub struct MessageTimeout<'a> {
    stream: &'a mut MessageStream,
    patience: Duration,
}

impl<'a> MessageTimeout<'a> {
    pub fn new(stream: &'a mut MessageStream, patience: Duration) -> Self {
        Self { stream, patience }
    }

    pub fn next(&mut self) -> Result<Option<Message>, StreamError> {
        if self.stream.is_cancelled() {
            return Ok(None);
        }
        match self.stream.receiver().recv_timeout(self.patience) {
            Ok(message) => Ok(Some(message)),
            Err(RecvTimeoutError::Timeout) => Err(StreamError::MessageTimeout),
            Err(RecvTimeoutError::Disconnected) => Ok(None),
        }
    }

    pub fn drain(mut self, mut on_message: impl FnMut(&Message)) -> DrainReport {
        let mut received = 0;
        let stop = loop {
            match self.next() {
                Ok(Some(message)) => {
                    on_message(&message);
                    received += 1;
                    if let Err(e) = message.acknowledge() {
                        tracing::trace!("Acknowledgment not delivered: {e}");
                    }
                }
                Ok(None) => break StopReason::Closed,
                Err(_) => break StopReason::MessageTimeout,
            }
        };
        DrainReport { received, stop }
    }
}
