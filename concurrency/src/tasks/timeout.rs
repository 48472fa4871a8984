use std::time::Duration;

use rendezvous_rt::tasks::{self as rt, Instant};

use super::message::{Message, MessageStream};
use crate::drain::{DrainReport, StopReason};
use crate::error::StreamError;

/// Bounds the whole time spent consuming a stream.
///
/// The deadline is armed once, when the wrapper is created, and never reset.
/// A duration too large to represent as an instant means no deadline.
/// Expiry stops the consumer only; the producer is released by dropping or
/// cancelling the stream.
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

    pub async fn next(&mut self) -> Result<Option<Message>, StreamError> {
        let Some(deadline) = self.deadline else {
            return Ok(self.stream.next().await);
        };
        rt::timeout_at(deadline, self.stream.next())
            .await
            .map_err(|_| StreamError::DeadlineElapsed)
    }

    /// Consumes messages until the deadline, acknowledging each one after
    /// `on_message` has seen it.
    pub async fn drain(mut self, mut on_message: impl FnMut(&Message)) -> DrainReport {
        let mut received = 0;
        let stop = loop {
            match self.next().await {
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

/// Bounds the wait for each message.
///
/// A fresh timer is armed before every receive, so a steady producer is never
/// cut off no matter how long the conversation runs.
#[derive(Debug)]
pub struct MessageTimeout<'a> {
    stream: &'a mut MessageStream,
    patience: Duration,
}

impl<'a> MessageTimeout<'a> {
    pub fn new(stream: &'a mut MessageStream, patience: Duration) -> Self {
        Self { stream, patience }
    }

    pub async fn next(&mut self) -> Result<Option<Message>, StreamError> {
        rt::timeout(self.patience, self.stream.next())
            .await
            .map_err(|_| StreamError::MessageTimeout)
    }

    /// Consumes messages until one is late, acknowledging each one after
    /// `on_message` has seen it.
    pub async fn drain(mut self, mut on_message: impl FnMut(&Message)) -> DrainReport {
        let mut received = 0;
        let stop = loop {
            match self.next().await {
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
