use std::time::Duration;

/// A live task: the latest description plus the clock reading taken when timing began.
#[derive(Debug)]
pub(crate) struct Task {
    description: String,
    started_at: Duration,
}

impl Task {
    pub(crate) fn new(description: String, started_at: Duration) -> Self {
        Self {
            description,
            started_at,
        }
    }

    pub(crate) fn description(&self) -> &str {
        &self.description
    }

    pub(crate) fn into_description(self) -> String {
        self.description
    }

    /// Time elapsed between the start of the task and the clock reading `now`.
    pub(crate) fn elapsed(&self, now: Duration) -> Duration {
        now.saturating_sub(self.started_at)
    }
}
