use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::pal::abstractions::Platform;

/// Manually driven clock for tests.
///
/// Clones share the same reading, so a test can keep one handle and move time forward
/// while the profiler under test holds another.
#[derive(Clone, Debug)]
pub(crate) struct FakePlatform {
    now: Arc<Mutex<Duration>>,
}

impl FakePlatform {
    pub(crate) fn new() -> Self {
        Self {
            now: Arc::new(Mutex::new(Duration::ZERO)),
        }
    }

    /// Moves the clock forward by `by`.
    pub(crate) fn advance(&self, by: Duration) {
        let mut now = self
            .now
            .lock()
            .expect("FakePlatform state lock should not be poisoned");

        *now = now.saturating_add(by);
    }

    pub(crate) fn advance_millis(&self, millis: u64) {
        self.advance(Duration::from_millis(millis));
    }
}

impl Platform for FakePlatform {
    fn now(&self) -> Duration {
        *self
            .now
            .lock()
            .expect("FakePlatform state lock should not be poisoned")
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero() {
        let platform = FakePlatform::new();
        assert_eq!(platform.now(), Duration::ZERO);
    }

    #[test]
    fn advance_accumulates() {
        let platform = FakePlatform::new();

        platform.advance_millis(150);
        platform.advance(Duration::from_micros(500));

        assert_eq!(platform.now(), Duration::from_micros(150_500));
    }

    #[test]
    fn clones_share_state() {
        let platform1 = FakePlatform::new();
        let platform2 = platform1.clone();

        platform1.advance_millis(100);

        assert_eq!(platform2.now(), Duration::from_millis(100));
    }
}
