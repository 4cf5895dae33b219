use std::time::{Duration, Instant};

use crate::pal::abstractions::Platform;

/// Monotonic clock backed by `std::time::Instant`.
#[derive(Debug, Clone)]
pub(crate) struct RealPlatform {
    origin: Instant,
}

impl RealPlatform {
    pub(crate) fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Platform for RealPlatform {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn readings_are_monotonic() {
        let platform = RealPlatform::new();

        let first = platform.now();
        let second = platform.now();

        assert!(second >= first);
    }
}
