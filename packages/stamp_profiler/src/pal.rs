//! Platform abstraction layer for reading the monotonic clock.
//!
//! The real platform reads `std::time::Instant`. Tests substitute a fake clock
//! that only moves when told to, so elapsed times are exact.

mod abstractions;
mod facade;
#[cfg(test)]
mod fake;
mod real;

pub(crate) use abstractions::Platform;
pub(crate) use facade::PlatformFacade;
#[cfg(test)]
pub(crate) use fake::FakePlatform;
