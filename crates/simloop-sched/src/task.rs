//! Task bodies as seen by the run loop.

use std::future::Future;
use std::pin::Pin;

use simloop_core::{TaskError, TaskId};

/// Why a task stopped the run loop.
pub(crate) enum Halt {
    /// The `run_until` sentinel fired.  Never leaves the scheduler.
    Stop,
    /// A task body resolved to an error.
    Failed(TaskId, TaskError),
}

/// A boxed task body.  Completion is `Ok(())`; anything else ends the run.
pub(crate) type TaskFuture = Pin<Box<dyn Future<Output = Result<(), Halt>>>>;

/// Output types a task body may resolve to.
///
/// Infallible tasks return `()`.  Fallible tasks return `Result<(), E>`; an
/// `Err` aborts the whole run and is reported as
/// [`SimError::TaskFailed`][simloop_core::SimError::TaskFailed].
pub trait TaskOutput {
    fn into_result(self) -> Result<(), TaskError>;
}

impl TaskOutput for () {
    #[inline]
    fn into_result(self) -> Result<(), TaskError> {
        Ok(())
    }
}

impl<E: Into<TaskError>> TaskOutput for Result<(), E> {
    #[inline]
    fn into_result(self) -> Result<(), TaskError> {
        self.map_err(Into::into)
    }
}
