use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum StreamError {
    #[error("Producer is no longer running")]
    ProducerGone,
    #[error("Overall deadline elapsed")]
    DeadlineElapsed,
    #[error("No message arrived within the allotted time")]
    MessageTimeout,
}
