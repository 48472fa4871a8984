//! IO-threads based module to support shared behavior with the task based version.

pub mod rendezvous;

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
};
pub use std::thread::{sleep, spawn, JoinHandle};

use crate::tracing::init_tracing;

pub fn run(f: fn()) {
    init_tracing();

    f()
}

/// A token that can be used to signal cancellation.
///
/// Besides polling [`is_cancelled`](Self::is_cancelled), a blocked thread can
/// wait on [`cancelled`](Self::cancelled) inside a `select!`: the returned
/// receiver disconnects, and therefore becomes ready, when the token fires.
#[derive(Clone)]
pub struct CancellationToken {
    inner: Arc<Inner>,
}

struct Inner {
    is_cancelled: AtomicBool,
    trigger: Mutex<Option<rendezvous::Sender<()>>>,
    signal: rendezvous::Receiver<()>,
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CancellationToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CancellationToken")
            .field("is_cancelled", &self.is_cancelled())
            .finish()
    }
}

impl CancellationToken {
    pub fn new() -> Self {
        let (trigger, signal) = rendezvous::channel();
        CancellationToken {
            inner: Arc::new(Inner {
                is_cancelled: AtomicBool::new(false),
                trigger: Mutex::new(Some(trigger)),
                signal,
            }),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.is_cancelled.load(Ordering::SeqCst)
    }

    pub fn cancel(&self) {
        self.inner.is_cancelled.store(true, Ordering::SeqCst);
        // Dropping the only sender disconnects every `cancelled()` receiver.
        let trigger = self
            .inner
            .trigger
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take();
        drop(trigger);
    }

    /// Receiver that never yields a value and disconnects on cancellation.
    pub fn cancelled(&self) -> rendezvous::Receiver<()> {
        self.inner.signal.clone()
    }
}
