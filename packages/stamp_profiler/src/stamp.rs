use std::time::Duration;

/// One completed timing sample.
///
/// A stamp is recorded when a task is stopped or when it is superseded by a new start of the
/// same key. Stamps are never modified after they are recorded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Stamp {
    key: String,
    description: String,
    elapsed: Duration,
}

impl Stamp {
    pub(crate) fn new(key: String, description: String, elapsed: Duration) -> Self {
        Self {
            key,
            description,
            elapsed,
        }
    }

    /// The key of the task this sample was taken from.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The task description that was in effect when the sample was closed.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Full-resolution elapsed time of the sample.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Elapsed time in whole milliseconds, with any fractional millisecond truncated.
    #[must_use]
    pub fn elapsed_millis(&self) -> u64 {
        // Saturate instead of failing; 2^64 milliseconds is far beyond any process lifetime.
        u64::try_from(self.elapsed.as_millis()).unwrap_or(u64::MAX)
    }
}
