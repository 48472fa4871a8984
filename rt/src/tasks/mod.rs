//! Tokio.rs reexports to prevent tokio dependencies within external code,
//! plus the async rendezvous channel.

pub mod rendezvous;

use crate::tracing::init_tracing;
use std::future::Future;

pub use tokio::{
    runtime::Runtime,
    sync::{mpsc, oneshot},
    task::{spawn, JoinHandle},
    time::{sleep, timeout, timeout_at, Instant},
};
pub use tokio_util::sync::CancellationToken;

/// Runs `future` to completion on a fresh multi-threaded runtime, with
/// tracing initialised.
pub fn run<F: Future>(future: F) -> F::Output {
    init_tracing();

    let rt = Runtime::new().expect("failed to build tokio runtime");
    rt.block_on(future)
}
