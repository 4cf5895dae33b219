use crate::Profiler;

/// Stops a task when dropped.
///
/// Returned by [`Profiler::scoped_task()`] and [`Profiler::scoped()`]. If the key was
/// restarted while the guard was alive, the drop stops whichever sample is running under
/// the key at that point.
#[derive(Debug)]
#[must_use = "the task is stopped when the guard is dropped"]
pub struct TaskGuard<'a> {
    profiler: &'a Profiler,
    key: String,
}

impl<'a> TaskGuard<'a> {
    pub(crate) fn new(profiler: &'a Profiler, key: String) -> Self {
        Self { profiler, key }
    }

    /// Key of the guarded task.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl Drop for TaskGuard<'_> {
    fn drop(&mut self) {
        self.profiler.stop_task(&self.key);
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn drop_after_manual_stop_is_harmless() {
        let profiler = Profiler::new();

        let guard = profiler.scoped("k", "work");
        profiler.stop_task(guard.key());
        drop(guard);

        assert_eq!(profiler.to_report().key("k").unwrap().sample_count(), 1);
    }

    static_assertions::assert_impl_all!(TaskGuard<'static>: Send, Sync);
}
