//! IO-threads based streams: one OS thread per producer or forwarder, with
//! crossbeam `select!` standing in for the async races of the tasks module.

mod fan_in;
mod generator;
mod message;
mod timeout;

#[cfg(test)]
mod generator_tests;

pub use fan_in::{fan_in, fan_in_all};
pub use generator::{generator, quitable, Generator};
pub use message::{Handoff, Message, MessageStream, QuitHandle};
pub use timeout::{MessageTimeout, OverallTimeout};
