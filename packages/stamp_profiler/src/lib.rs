#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Keyed timing of repeated work with aggregated text reports.
//!
//! Mark the start and end of a piece of work under a string key and the [`Profiler`] records
//! how long it took. Each start/stop cycle of a key adds one sample ([`Stamp`]) to the log,
//! and the report summarizes all samples per key: total time, shortest, longest and mean,
//! optionally followed by every individual sample.
//!
//! The core functionality includes:
//! - [`Profiler`] - Registry of running tasks and the log of completed samples
//! - [`TaskGuard`] - Stops a task when dropped
//! - [`Report`] - Snapshot of running tasks and per-key statistics, renderable as text
//! - [`ReportOptions`] - Selects which keys get per-sample detail lines
//!
//! Time is measured with the monotonic wall clock.
//!
//! # Simple usage
//!
//! ```
//! use stamp_profiler::Profiler;
//!
//! let profiler = Profiler::new();
//!
//! for _ in 0..3 {
//!     profiler.start_task("parse", "parse config");
//!     // Perform the work here.
//!     profiler.stop_task("parse");
//! }
//!
//! let report = profiler.to_report();
//! assert_eq!(report.key("parse").unwrap().sample_count(), 3);
//!
//! // Summary lines for every key, with a line per sample for each of them.
//! println!("{}", profiler.report_all());
//! ```
//!
//! # Anonymous tasks
//!
//! If there is no natural key for the work, let the profiler generate one:
//!
//! ```
//! use stamp_profiler::Profiler;
//!
//! let profiler = Profiler::new();
//!
//! let key = profiler.create_task("load assets");
//! // Perform the work here.
//! profiler.stop_task(&key);
//!
//! {
//!     let _task = profiler.scoped_task("warm caches");
//!     // Perform the work here. The task stops when `_task` is dropped.
//! }
//! ```
//!
//! # Selecting detail lines
//!
//! ```
//! use stamp_profiler::{Profiler, ReportOptions};
//!
//! let profiler = Profiler::new();
//!
//! profiler.start_task("x", "first x");
//! profiler.stop_task("x");
//! profiler.start_task("y", "first y");
//! profiler.stop_task("y");
//!
//! // Per-sample lines only for "x".
//! let text = profiler.report_keys(["x"]);
//! assert!(text.contains("first x"));
//! assert!(!text.contains("first y"));
//!
//! // Summary lines only.
//! let text = profiler.report(&ReportOptions::new());
//! assert!(!text.contains("first x"));
//! ```
//!
//! # Threading
//!
//! A [`Profiler`] is `Send + Sync`. Share it between threads via `Arc`; every operation takes
//! the same internal lock, so a report never observes a half-applied start or stop.
//!
//! # Memory
//!
//! Every stamp is kept until [`Profiler::reset()`] is called. Long-running processes that
//! keep recording must reset the profiler periodically.
//!
//! # Logging
//!
//! Task lifecycle events are emitted via `tracing` under the `stamp_profiler` target, at
//! `trace` level for regular starts and stops and `debug` level for restarts and resets.

mod pal;
mod profiler;
mod report;
mod report_options;
mod stamp;
mod task;
mod task_guard;

pub use profiler::Profiler;
pub use report::{ActiveTask, KeySummary, Report};
pub use report_options::ReportOptions;
pub use stamp::Stamp;
pub use task_guard::TaskGuard;

// A poisoned lock means a thread panicked in the middle of updating the registry.
pub(crate) const ERR_POISONED_LOCK: &str =
    "encountered poisoned lock - profiler state may be torn and cannot be trusted";
