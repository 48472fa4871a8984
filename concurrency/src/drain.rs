use std::fmt::Display;

/// Why a timed drain stopped consuming.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The overall deadline fired.
    DeadlineElapsed,
    /// No message arrived within the per-message window.
    MessageTimeout,
    /// Every producer feeding the stream has stopped.
    Closed,
}

impl Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DeadlineElapsed => write!(f, "deadline elapsed"),
            Self::MessageTimeout => write!(f, "message timeout"),
            Self::Closed => write!(f, "stream closed"),
        }
    }
}

/// Outcome of draining a stream under a timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrainReport {
    pub received: usize,
    pub stop: StopReason,
}
