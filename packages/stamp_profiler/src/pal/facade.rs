use std::time::Duration;

use crate::pal::abstractions::Platform;
#[cfg(test)]
use crate::pal::fake::FakePlatform;
use crate::pal::real::RealPlatform;

/// Switches between the real clock and the fake clock used by tests.
#[derive(Debug, Clone)]
pub(crate) enum PlatformFacade {
    Real(RealPlatform),

    #[cfg(test)]
    Fake(FakePlatform),
}

impl PlatformFacade {
    pub(crate) fn real() -> Self {
        Self::Real(RealPlatform::new())
    }

    #[cfg(test)]
    pub(crate) fn fake(fake_platform: FakePlatform) -> Self {
        Self::Fake(fake_platform)
    }
}

impl Platform for PlatformFacade {
    fn now(&self) -> Duration {
        match self {
            Self::Real(platform) => platform.now(),
            #[cfg(test)]
            Self::Fake(platform) => platform.now(),
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn fake_facade_forwards_to_fake_clock() {
        let fake_platform = FakePlatform::new();
        let facade = PlatformFacade::fake(fake_platform.clone());

        fake_platform.advance(Duration::from_millis(300));

        assert_eq!(facade.now(), Duration::from_millis(300));
    }

    #[test]
    fn real_facade_reads_real_clock() {
        let facade = PlatformFacade::real();
        assert!(matches!(facade, PlatformFacade::Real(_)));

        let first = facade.now();
        assert!(facade.now() >= first);
    }
}
