//! # rendezvous-concurrency
//!
//! Producer/consumer patterns built on unbuffered channels:
//!
//! - **Generator** - an unbounded producer that waits for the consumer to
//!   acknowledge each [`Message`](tasks::Message) before producing the next one
//! - **Quitable generator** - same production loop, stopped through a
//!   [`QuitHandle`](tasks::QuitHandle) that answers with a farewell
//! - **Fan-in** - merges several streams into one, either with a forwarding
//!   worker per source ([`fan_in`](tasks::fan_in)) or with a single worker
//!   waiting on all of them ([`fan_in_all`](tasks::fan_in_all))
//! - **Timeouts** - [`OverallTimeout`](tasks::OverallTimeout) bounds a whole
//!   conversation, [`MessageTimeout`](tasks::MessageTimeout) bounds the wait
//!   for each message
//!
//! ## Hand-off
//!
//! Every message of one generator carries a clone of the same hand-off handle.
//! The producer blocks after each message until *some* acknowledgment arrives,
//! so at most one message per generator is in flight. Fan-in forwards messages
//! untouched: acknowledging a merged message unblocks the generator that
//! produced it.
//!
//! ```ignore
//! use rendezvous_concurrency::tasks::{fan_in, generator};
//!
//! let mut merged = fan_in(generator("Joe"), generator("Ann"));
//! while let Some(message) = merged.next().await {
//!     println!("{message}");
//!     message.acknowledge()?;
//! }
//! ```
//!
//! ## Cancellation
//!
//! Every producer and forwarder owns a cancellation token checked at each
//! suspension point. Dropping a stream cancels whatever feeds it, so an
//! abandoned generator never outlives its consumer. Timeouts, on the other
//! hand, only stop the *consumer*: the producer keeps waiting until the
//! stream is dropped or cancelled.
//!
//! ## Backends
//!
//! - [`tasks`] - tokio tasks, async API
//! - [`threads`] - one OS thread per worker, blocking API with crossbeam select

mod drain;
pub mod error;
mod options;
pub mod tasks;
pub mod threads;

pub use drain::{DrainReport, StopReason};
pub use error::StreamError;
pub use options::{GeneratorOptions, DEFAULT_FAREWELL, DEFAULT_MAX_DELAY};
