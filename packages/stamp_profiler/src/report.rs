//! Timing reports.

use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::fmt::{self, Display};
use std::time::Duration;

use crate::{ReportOptions, Stamp};

const BANNER: &str = "==================";
const STAMPS_BANNER: &str = "=======Stamps========";

/// Snapshot of the state of a [`Profiler`](crate::Profiler) at the moment it was taken.
///
/// Contains the tasks that were still running and a summary of all recorded stamps,
/// grouped by key. Keys are ordered by ordinal string comparison.
///
/// A report is detached from the profiler it came from and can be sent to other threads.
///
/// # Examples
///
/// ```
/// use stamp_profiler::{Profiler, ReportOptions};
///
/// let profiler = Profiler::new();
///
/// profiler.start_task("io", "read file");
/// profiler.stop_task("io");
///
/// let report = profiler.to_report();
/// let io = report.keys().next().unwrap();
/// assert_eq!(io.key(), "io");
/// assert_eq!(io.sample_count(), 1);
///
/// println!("{}", report.render(&ReportOptions::new()));
/// ```
#[derive(Clone, Debug)]
pub struct Report {
    active_tasks: Vec<ActiveTask>,
    keys: Vec<KeySummary>,
}

impl Report {
    /// Builds a report from the live tasks and the stamp log, in insertion order.
    pub(crate) fn new(mut active_tasks: Vec<ActiveTask>, stamps: &[Stamp]) -> Self {
        active_tasks.sort_by(|a, b| a.key.cmp(&b.key));

        let mut groups: BTreeMap<&str, Vec<Stamp>> = BTreeMap::new();

        for stamp in stamps {
            groups.entry(stamp.key()).or_default().push(stamp.clone());
        }

        let keys = groups
            .into_iter()
            .map(|(key, stamps)| KeySummary::new(key.to_owned(), stamps))
            .collect();

        Self { active_tasks, keys }
    }

    /// Tasks that were running when the report was taken, ordered by key.
    pub fn active_tasks(&self) -> impl Iterator<Item = &ActiveTask> {
        self.active_tasks.iter()
    }

    /// Per-key summaries of the recorded stamps, ordered by key.
    pub fn keys(&self) -> impl Iterator<Item = &KeySummary> {
        self.keys.iter()
    }

    /// Looks up the summary for a single key.
    #[must_use]
    pub fn key(&self, key: &str) -> Option<&KeySummary> {
        self.keys.iter().find(|summary| summary.key == key)
    }

    /// Whether the report has neither running tasks nor recorded stamps.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active_tasks.is_empty() && self.keys.is_empty()
    }

    /// Renders the report as multi-line text.
    ///
    /// The text always starts with a header, followed by a section for the running tasks
    /// (omitted if there are none) and the stamps section with one summary line per key.
    /// Keys selected by `options` are followed by one line per sample, longest first.
    #[must_use]
    pub fn render(&self, options: &ReportOptions) -> String {
        Rendered {
            report: self,
            options,
        }
        .to_string()
    }
}

impl Display for Report {
    /// Renders the report with detail lines for every key.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Rendered {
            report: self,
            options: &ReportOptions::detailed(),
        }
        .fmt(f)
    }
}

/// A task that was still running when a [`Report`] was taken.
#[derive(Clone, Debug)]
pub struct ActiveTask {
    key: String,
    description: String,
    elapsed: Duration,
}

impl ActiveTask {
    pub(crate) fn new(key: String, description: String, elapsed: Duration) -> Self {
        Self {
            key,
            description,
            elapsed,
        }
    }

    /// Key of the running task.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Latest description given to the running task.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Time the task had been running for when the report was taken.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Whole milliseconds the task had been running for when the report was taken.
    #[must_use]
    pub fn elapsed_millis(&self) -> u64 {
        u64::try_from(self.elapsed.as_millis()).unwrap_or(u64::MAX)
    }
}

/// Aggregated statistics over all stamps recorded for one key.
#[derive(Clone, Debug)]
pub struct KeySummary {
    key: String,

    // Insertion order. Never empty.
    stamps: Vec<Stamp>,

    total: Duration,
    min_millis: u64,
    max_millis: u64,
    mean_millis: f64,
}

impl KeySummary {
    fn new(key: String, stamps: Vec<Stamp>) -> Self {
        debug_assert!(!stamps.is_empty());

        let total = stamps
            .iter()
            .map(Stamp::elapsed)
            .fold(Duration::ZERO, Duration::saturating_add);

        let min_millis = stamps
            .iter()
            .map(Stamp::elapsed_millis)
            .min()
            .unwrap_or_default();

        let max_millis = stamps
            .iter()
            .map(Stamp::elapsed_millis)
            .max()
            .unwrap_or_default();

        let sum_millis: u128 = stamps
            .iter()
            .map(|stamp| u128::from(stamp.elapsed_millis()))
            .sum();

        #[expect(
            clippy::cast_precision_loss,
            reason = "the mean is for display - float precision is plenty"
        )]
        let mean_millis = sum_millis as f64 / stamps.len() as f64;

        Self {
            key,
            stamps,
            total,
            min_millis,
            max_millis,
            mean_millis,
        }
    }

    /// The key the stamps were recorded under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Number of stamps recorded for the key.
    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.stamps.len()
    }

    /// Sum of the full-resolution elapsed times of all stamps.
    #[must_use]
    pub fn total(&self) -> Duration {
        self.total
    }

    /// Shortest sample, in whole milliseconds.
    #[must_use]
    pub fn min_millis(&self) -> u64 {
        self.min_millis
    }

    /// Longest sample, in whole milliseconds.
    #[must_use]
    pub fn max_millis(&self) -> u64 {
        self.max_millis
    }

    /// Arithmetic mean of the samples' whole-millisecond values.
    #[must_use]
    pub fn mean_millis(&self) -> f64 {
        self.mean_millis
    }

    /// The stamps in the order they were recorded.
    pub fn stamps(&self) -> impl Iterator<Item = &Stamp> {
        self.stamps.iter()
    }

    /// The stamps ordered from longest to shortest.
    ///
    /// Stamps with equal millisecond values keep the order in which they were recorded.
    #[must_use]
    pub fn stamps_by_elapsed_desc(&self) -> Vec<&Stamp> {
        let mut sorted: Vec<&Stamp> = self.stamps.iter().collect();
        sorted.sort_by_key(|stamp| Reverse(stamp.elapsed_millis()));
        sorted
    }
}

struct Rendered<'a> {
    report: &'a Report,
    options: &'a ReportOptions,
}

impl Display for Rendered<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{BANNER}")?;
        writeln!(f, "Profiler Report")?;
        writeln!(f, "{BANNER}")?;

        if !self.report.active_tasks.is_empty() {
            writeln!(f, "{BANNER}")?;
            writeln!(f, "Active tasks count: {}", self.report.active_tasks.len())?;

            for task in &self.report.active_tasks {
                writeln!(
                    f,
                    "   Key: {}, Description: {}, Watch State (ms): {}",
                    task.key,
                    task.description,
                    task.elapsed_millis()
                )?;
            }

            writeln!(f, "{BANNER}")?;
        }

        writeln!(f, "{STAMPS_BANNER}")?;

        for summary in &self.report.keys {
            writeln!(
                f,
                " Key: {}, Total Time: {}, Min Time(ms): {}, Max Time(ms): {}, Avg Time(ms): {:.2}",
                summary.key,
                ClockTime(summary.total),
                summary.min_millis,
                summary.max_millis,
                summary.mean_millis
            )?;

            if self.options.displays_key(&summary.key) {
                for stamp in summary.stamps_by_elapsed_desc() {
                    writeln!(
                        f,
                        "      Description: {}, Elapsed(ms): {}",
                        stamp.description(),
                        stamp.elapsed_millis()
                    )?;
                }
            }
        }

        Ok(())
    }
}

/// Formats a duration as `hh:mm:ss.fff`. Hours are not wrapped into days.
struct ClockTime(Duration);

impl Display for ClockTime {
    #[allow(
        clippy::arithmetic_side_effects,
        clippy::integer_division,
        reason = "splitting into clock fields with non-zero constant divisors"
    )]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let seconds = self.0.as_secs();
        let millis = self.0.subsec_millis();

        write!(
            f,
            "{:02}:{:02}:{:02}.{millis:03}",
            seconds / 3600,
            (seconds / 60) % 60,
            seconds % 60
        )
    }
}
