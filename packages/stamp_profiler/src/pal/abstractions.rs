use std::fmt::Debug;
use std::time::Duration;

/// Provides monotonic clock readings.
pub(crate) trait Platform: Debug + Send + Sync + 'static {
    /// Time since an arbitrary fixed origin owned by the platform.
    ///
    /// Readings never go backwards. Only differences between two readings
    /// from the same platform instance are meaningful.
    fn now(&self) -> Duration;
}
