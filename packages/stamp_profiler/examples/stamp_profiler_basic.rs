//! Times a few kinds of work repeatedly and prints the report.

use std::hint::black_box;
use std::thread;
use std::time::Duration;

use stamp_profiler::Profiler;

fn main() {
    let profiler = Profiler::new();

    for millis in [3, 7, 5] {
        profiler.start_task("sleep", format!("sleep {millis} ms"));
        thread::sleep(Duration::from_millis(millis));
        profiler.stop_task("sleep");
    }

    for _ in 0..3 {
        let _task = profiler.scoped("sum", "sum of squares");

        let mut sum = 0_u64;
        for i in 0..100_000_u64 {
            sum = sum.wrapping_add(i.wrapping_mul(i));
        }
        black_box(sum);
    }

    // Still running when the report is taken, so it appears in the active tasks section.
    profiler.start_task("background", "never stopped");

    println!("{}", profiler.report_keys(["sleep"]));

    profiler.reset();
    profiler.print_to_stdout(); // Prints nothing.
}
