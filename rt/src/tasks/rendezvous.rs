//! Unbuffered async channel with rendezvous semantics.
//!
//! tokio has no zero-capacity channel, so the receiver drives the exchange:
//! every `recv` posts an empty slot and a sender fills exactly one slot per
//! `send`. A value is therefore never parked in a buffer; `send` returns only
//! once a slot posted by the receiver has taken it.
//!
//! Both halves are cancel-safe. A dropped `recv` leaves its slot posted and
//! the next `recv` waits on that same slot, so at most one slot per receiver
//! is ever queued and a value delivered in between is not lost. Senders skip
//! slots whose receiver is gone, keeping their value. Dropping a pending
//! `send` delivers nothing.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot, Mutex};

pub use tokio::sync::mpsc::error::SendError;

type Slot<T> = oneshot::Sender<T>;

/// Creates a connected sender/receiver pair.
pub fn channel<T>() -> (Sender<T>, Receiver<T>) {
    let (slots_tx, slots_rx) = mpsc::unbounded_channel();
    (
        Sender {
            slots: Arc::new(Mutex::new(slots_rx)),
        },
        Receiver {
            slots: slots_tx,
            pending: None,
        },
    )
}

/// Sending half. Cloneable: several workers may compete for one receiver,
/// each receive is served by exactly one of them.
pub struct Sender<T> {
    slots: Arc<Mutex<mpsc::UnboundedReceiver<Slot<T>>>>,
}

impl<T> Clone for Sender<T> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
        }
    }
}

impl<T> std::fmt::Debug for Sender<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("rendezvous::Sender").finish_non_exhaustive()
    }
}

impl<T> Sender<T> {
    /// Waits for a receiver and hands `value` over.
    ///
    /// Fails, returning the value, once the receiver has been dropped.
    pub async fn send(&self, value: T) -> Result<(), SendError<T>> {
        let mut value = value;
        let mut slots = self.slots.lock().await;
        loop {
            let Some(slot) = slots.recv().await else {
                return Err(SendError(value));
            };
            match slot.send(value) {
                Ok(()) => return Ok(()),
                // The receive that posted this slot was abandoned.
                Err(returned) => value = returned,
            }
        }
    }
}

/// Receiving half. Single consumer.
pub struct Receiver<T> {
    slots: mpsc::UnboundedSender<Slot<T>>,
    // Slot posted by a receive that was dropped before completing. It stays
    // queued (or already filled) and is awaited again by the next receive.
    pending: Option<oneshot::Receiver<T>>,
}

impl<T> std::fmt::Debug for Receiver<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("rendezvous::Receiver").finish_non_exhaustive()
    }
}

impl<T> Receiver<T> {
    /// Waits for the next value. Returns `None` once every sender is gone.
    pub async fn recv(&mut self) -> Option<T> {
        if self.pending.is_none() {
            let (slot, value) = oneshot::channel();
            self.slots.send(slot).ok()?;
            self.pending = Some(value);
        }
        let value = match self.pending.as_mut() {
            Some(slot) => slot.await,
            None => return None,
        };
        self.pending = None;
        value.ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::timeout;

    #[test]
    fn send_waits_for_a_receiver() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        runtime.block_on(async move {
            let (tx, mut rx) = channel::<u32>();
            let pending = tokio::spawn(async move { tx.send(7).await.is_ok() });

            tokio::time::sleep(Duration::from_millis(50)).await;
            assert!(!pending.is_finished());

            assert_eq!(rx.recv().await, Some(7));
            assert!(pending.await.unwrap());
        })
    }

    #[test]
    fn abandoned_receive_does_not_lose_the_value() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        runtime.block_on(async move {
            let (tx, mut rx) = channel::<u32>();

            // Nobody is sending yet, so this receive times out and leaves its
            // slot posted for the next one.
            assert!(timeout(Duration::from_millis(20), rx.recv()).await.is_err());

            tokio::spawn(async move {
                let _ = tx.send(1).await;
                let _ = tx.send(2).await;
            });
            assert_eq!(rx.recv().await, Some(1));
            assert_eq!(rx.recv().await, Some(2));
            assert_eq!(rx.recv().await, None);
        })
    }

    #[test]
    fn repeated_timeouts_reuse_one_slot() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        runtime.block_on(async move {
            let (tx, mut rx) = channel::<u32>();

            for _ in 0..1000 {
                assert!(timeout(Duration::from_nanos(1), rx.recv()).await.is_err());
            }
            assert!(tx.slots.lock().await.len() <= 1);

            tokio::spawn(async move {
                let _ = tx.send(9).await;
            });
            assert_eq!(rx.recv().await, Some(9));
        })
    }

    #[test]
    fn send_fails_without_receiver() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        runtime.block_on(async move {
            let (tx, rx) = channel::<&str>();
            drop(rx);
            let err = tx.send("lost").await.unwrap_err();
            assert_eq!(err.0, "lost");
        })
    }

    #[test]
    fn cloned_senders_share_one_receiver() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        runtime.block_on(async move {
            let (tx, mut rx) = channel::<u32>();
            for i in 0..3 {
                let tx = tx.clone();
                tokio::spawn(async move {
                    let _ = tx.send(i).await;
                });
            }
            drop(tx);

            let mut received = Vec::new();
            while let Some(value) = rx.recv().await {
                received.push(value);
            }
            received.sort();
            assert_eq!(received, vec![0, 1, 2]);
        })
    }
}
