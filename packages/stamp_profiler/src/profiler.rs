use std::collections::hash_map::Entry;
use std::mem;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use foldhash::HashMap;
use tracing::{debug, trace};

use crate::pal::{Platform, PlatformFacade};
use crate::task::Task;
use crate::{ActiveTask, ERR_POISONED_LOCK, Report, ReportOptions, Stamp, TaskGuard};

const LOG_TARGET: &str = "stamp_profiler";

// Shared by all profilers so generated keys are unique within the process.
static NEXT_ANONYMOUS_TASK_ID: AtomicU64 = AtomicU64::new(0);

/// Registry of running tasks and the log of completed timing samples.
///
/// A task is identified by a string key. Starting a key begins timing it; stopping the key
/// records a [`Stamp`] with the elapsed time and the task's description. The same key can be
/// started and stopped any number of times, and every cycle adds one more stamp, so the report
/// can show how the timing of a piece of work varies across invocations.
///
/// Starting a key that is already running first closes the running sample (recording a stamp
/// with the old description) and then immediately begins a new sample with the new description.
///
/// All operations are synchronized by a single lock, so a profiler can be shared between
/// threads (typically via `Arc`). The stamp log grows until [`reset()`](Self::reset) is called.
///
/// # Examples
///
/// ```
/// use stamp_profiler::Profiler;
///
/// let profiler = Profiler::new();
///
/// for file in ["a.txt", "b.txt"] {
///     profiler.start_task("io", format!("read {file}"));
///     // Read the file here.
///     profiler.stop_task("io");
/// }
///
/// let key = profiler.create_task("compute");
/// // Compute something here.
/// profiler.stop_task(&key);
///
/// println!("{}", profiler.report_all());
/// ```
#[derive(Debug)]
pub struct Profiler {
    state: Mutex<State>,
    platform: PlatformFacade,
}

#[derive(Debug, Default)]
struct State {
    tasks: HashMap<String, Task>,

    // Insertion order is preserved and is the tie-breaker when samples are sorted for display.
    stamps: Vec<Stamp>,
}

impl Profiler {
    /// Creates an empty profiler with no running tasks and no stamps.
    #[must_use]
    pub fn new() -> Self {
        Self::with_platform(PlatformFacade::real())
    }

    pub(crate) fn with_platform(platform: PlatformFacade) -> Self {
        Self {
            state: Mutex::new(State::default()),
            platform,
        }
    }

    /// Discards all running tasks and all recorded stamps.
    ///
    /// Running tasks are dropped without recording a stamp for them.
    pub fn reset(&self) {
        let (tasks, stamps) = {
            let mut state = self.state.lock().expect(ERR_POISONED_LOCK);
            mem::take(&mut *state).into_parts()
        };

        debug!(
            target: LOG_TARGET,
            discarded_tasks = tasks.len(),
            discarded_stamps = stamps.len(),
            "profiler reset"
        );
    }

    /// Starts timing the task identified by `key`.
    ///
    /// If `key` is already running, the running sample is closed first: a stamp is recorded with
    /// the description the task had until now, and timing restarts from zero with the new
    /// `description`.
    pub fn start_task(&self, key: impl Into<String>, description: impl Into<String>) {
        let key = key.into();
        let description = description.into();

        let mut guard = self.state.lock().expect(ERR_POISONED_LOCK);
        let state = &mut *guard;

        let now = self.platform.now();

        match state.tasks.entry(key) {
            Entry::Occupied(mut entry) => {
                let elapsed = entry.get().elapsed(now);
                let previous = mem::replace(entry.get_mut(), Task::new(description, now));

                debug!(
                    target: LOG_TARGET,
                    key = entry.key().as_str(),
                    previous_description = previous.description(),
                    description = entry.get().description(),
                    elapsed = ?elapsed,
                    "task restarted while running"
                );

                state.stamps.push(Stamp::new(
                    entry.key().clone(),
                    previous.into_description(),
                    elapsed,
                ));
            }
            Entry::Vacant(entry) => {
                trace!(
                    target: LOG_TARGET,
                    key = entry.key().as_str(),
                    description = description.as_str(),
                    "task started"
                );

                entry.insert(Task::new(description, now));
            }
        }
    }

    /// Stops timing the task identified by `key` and records a stamp for it.
    ///
    /// Stopping a key that is not running does nothing.
    pub fn stop_task(&self, key: &str) {
        let mut guard = self.state.lock().expect(ERR_POISONED_LOCK);
        let state = &mut *guard;

        let now = self.platform.now();

        let Some(task) = state.tasks.remove(key) else {
            trace!(target: LOG_TARGET, key, "stop ignored for task that is not running");
            return;
        };

        let elapsed = task.elapsed(now);

        trace!(
            target: LOG_TARGET,
            key,
            description = task.description(),
            elapsed = ?elapsed,
            "task stopped"
        );

        state
            .stamps
            .push(Stamp::new(key.to_owned(), task.into_description(), elapsed));
    }

    /// Starts a task under a newly generated key and returns that key.
    ///
    /// Pass the returned key to [`stop_task()`](Self::stop_task) to stop the task. The key is
    /// unique within the process.
    #[must_use = "the returned key is needed to stop the task"]
    pub fn create_task(&self, description: impl Into<String>) -> String {
        let key = next_anonymous_key();
        self.start_task(key.clone(), description);
        key
    }

    /// Starts a task under a newly generated key and stops it when the returned guard is dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use stamp_profiler::Profiler;
    ///
    /// let profiler = Profiler::new();
    ///
    /// {
    ///     let _task = profiler.scoped_task("compute");
    ///     // Work timed here.
    /// }
    ///
    /// assert_eq!(profiler.to_report().keys().count(), 1);
    /// ```
    pub fn scoped_task(&self, description: impl Into<String>) -> TaskGuard<'_> {
        TaskGuard::new(self, self.create_task(description))
    }

    /// Starts the task identified by `key` and stops it when the returned guard is dropped.
    pub fn scoped(
        &self,
        key: impl Into<String>,
        description: impl Into<String>,
    ) -> TaskGuard<'_> {
        let key = key.into();
        self.start_task(key.clone(), description);
        TaskGuard::new(self, key)
    }

    /// Takes a snapshot of the running tasks and all recorded stamps.
    ///
    /// Running tasks keep running; their elapsed time is read without stopping them.
    #[must_use]
    pub fn to_report(&self) -> Report {
        let state = self.state.lock().expect(ERR_POISONED_LOCK);

        let now = self.platform.now();

        let active_tasks = state
            .tasks
            .iter()
            .map(|(key, task)| {
                ActiveTask::new(key.clone(), task.description().to_owned(), task.elapsed(now))
            })
            .collect();

        Report::new(active_tasks, &state.stamps)
    }

    /// Renders a text report, with detail lines as selected by `options`.
    #[must_use]
    pub fn report(&self, options: &ReportOptions) -> String {
        self.to_report().render(options)
    }

    /// Renders a text report, with detail lines for every key if `need_details` is set.
    #[must_use]
    pub fn report_details(&self, need_details: bool) -> String {
        self.report(&ReportOptions::new().need_details(need_details))
    }

    /// Renders a text report with detail lines for every key.
    #[must_use]
    pub fn report_all(&self) -> String {
        self.report_details(true)
    }

    /// Renders a text report with detail lines only for the listed keys.
    #[must_use]
    pub fn report_keys<I, K>(&self, display_keys: I) -> String
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        self.report(&ReportOptions::new().display_keys(display_keys))
    }

    /// Prints the detailed report to stdout.
    ///
    /// Prints nothing if there are neither running tasks nor stamps.
    #[cfg_attr(test, mutants::skip)] // Too difficult to test stdout output reliably - manually tested.
    pub fn print_to_stdout(&self) {
        let report = self.to_report();

        if report.is_empty() {
            return;
        }

        print!("{report}");
    }
}

impl Default for Profiler {
    fn default() -> Self {
        Self::new()
    }
}

impl State {
    fn into_parts(self) -> (HashMap<String, Task>, Vec<Stamp>) {
        (self.tasks, self.stamps)
    }
}

fn next_anonymous_key() -> String {
    let id = NEXT_ANONYMOUS_TASK_ID.fetch_add(1, Ordering::Relaxed);
    format!("anonymous-{id:016x}")
}
