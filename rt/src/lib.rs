//! Runtime wrapper to remove dependencies from code. Using this library keeps
//! tokio and crossbeam out of the public surface of the other crates, so the
//! backends can be swapped without touching the stream patterns built on top.
//!
//! Two flavours are provided:
//! - [`tasks`]: tokio based, async.
//! - [`threads`]: OS threads plus crossbeam channels, blocking.
//!
//! Both expose the same small vocabulary: `spawn`, `sleep`, a
//! `CancellationToken` and an unbuffered [`tasks::rendezvous`] /
//! [`threads::rendezvous`] channel.

pub mod tasks;
pub mod threads;
mod tracing;
