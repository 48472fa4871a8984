use std::time::Duration;

use rand::Rng as _;

/// Upper bound (exclusive) of the pause a generator takes after each message.
pub const DEFAULT_MAX_DELAY: Duration = Duration::from_millis(1000);

/// What a quitable generator answers when asked to stop.
pub const DEFAULT_FAREWELL: &str = "See you!";

/// Settings shared by every generator flavour.
///
/// ```ignore
/// let options = GeneratorOptions::new("Joe")
///     .max_delay(Duration::from_millis(50))
///     .farewell("Bye");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    pub label: String,
    pub max_delay: Duration,
    pub farewell: String,
}

impl GeneratorOptions {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            max_delay: DEFAULT_MAX_DELAY,
            farewell: DEFAULT_FAREWELL.to_string(),
        }
    }

    pub fn max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = max_delay;
        self
    }

    pub fn farewell(mut self, farewell: impl Into<String>) -> Self {
        self.farewell = farewell.into();
        self
    }

    /// Uniform pause in `[0, max_delay)`.
    pub(crate) fn random_delay(&self) -> Duration {
        let bound = u64::try_from(self.max_delay.as_nanos()).unwrap_or(u64::MAX);
        if bound == 0 {
            return Duration::ZERO;
        }
        Duration::from_nanos(rand::rng().random_range(0..bound))
    }
}
