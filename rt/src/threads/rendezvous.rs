//! Zero-capacity crossbeam channel: a send blocks until a receive pairs with it.
//! Both halves work inside [`select!`] and [`Select`].

pub use crossbeam::channel::{
    after, bounded, never, select, Receiver, RecvError, RecvTimeoutError, Select, SendError,
    Sender, TrySendError,
};

/// Creates a connected sender/receiver pair with no buffer.
pub fn channel<T>() -> (Sender<T>, Receiver<T>) {
    crossbeam::channel::bounded(0)
}
