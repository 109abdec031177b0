//! Scheduler observer trait for progress reporting and instrumentation.

use simloop_core::{SimTime, TaskId};

/// Callbacks invoked by [`Scheduler::run_with`][crate::Scheduler::run_with]
/// and [`Scheduler::run_until_with`][crate::Scheduler::run_until_with].
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.  The scheduler is not borrowed while a
/// callback runs, so observers may read `Scheduler::now()` and friends.
///
/// # Example — clock printer
///
/// ```rust,ignore
/// struct ClockPrinter;
///
/// impl SchedObserver for ClockPrinter {
///     fn on_clock_advance(&mut self, from: SimTime, to: SimTime) {
///         println!("{from} -> {to}");
///     }
/// }
/// ```
pub trait SchedObserver {
    /// The clock jumped forward to wake a sleeper.  Never called for
    /// `from == to`.
    fn on_clock_advance(&mut self, _from: SimTime, _to: SimTime) {}

    /// `task` is about to be resumed at `now`.
    fn on_resume(&mut self, _task: TaskId, _now: SimTime) {}

    /// `task` completed normally and was dropped.
    fn on_task_done(&mut self, _task: TaskId, _now: SimTime) {}

    /// Called once when the run loop returns, whatever the outcome.
    fn on_run_end(&mut self, _now: SimTime) {}
}

/// A [`SchedObserver`] that does nothing.
pub struct NoopObserver;

impl SchedObserver for NoopObserver {}
