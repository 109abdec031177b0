//! Fluent builder for constructing a [`Scheduler`].

use simloop_core::{IntoDeadline, SimResult, SimTime};

use crate::Scheduler;

/// Fluent builder for [`Scheduler`].
///
/// # Optional inputs (have defaults)
///
/// | Method          | Default                 |
/// |-----------------|-------------------------|
/// | `.start_at(t)`  | `2000-01-01 00:00:00`   |
///
/// # Example
///
/// ```rust,ignore
/// let sched = SchedulerBuilder::new()
///     .start_at("2022-06-01")?
///     .build();
/// sched.new_task(work(sched.clone()));
/// sched.run()?;
/// ```
#[derive(Clone, Debug, Default)]
pub struct SchedulerBuilder {
    start: SimTime,
}

impl SchedulerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the instant the virtual clock starts at.
    ///
    /// Accepts anything [`IntoDeadline`] does; only strings can fail.
    pub fn start_at<D: IntoDeadline>(mut self, start: D) -> SimResult<Self> {
        self.start = start.into_deadline()?;
        Ok(self)
    }

    /// Return an empty, ready-to-use [`Scheduler`].
    pub fn build(self) -> Scheduler {
        Scheduler::starting_at(self.start)
    }
}
