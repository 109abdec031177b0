//! Engine error type.
//!
//! Sub-crates that touch the outside world (e.g. `simloop-output`) define
//! their own error enums.  Everything inside the run loop reports through
//! `SimError`.

use std::error::Error as StdError;

use thiserror::Error;

use crate::TaskId;

/// The error a task body hands back to the scheduler.
///
/// Tasks themselves never leave their thread, but the error may: it ends up
/// inside the `SimError` returned from the run loop.
pub type TaskError = Box<dyn StdError + Send + Sync + 'static>;

/// The top-level error type for all `simloop-*` crates.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid deadline {0:?}: expected an ISO-8601 date or date-time")]
    InvalidDeadline(String),

    /// `run*` or `shutdown` called while a run loop is active.
    #[error("run loop is already active on this scheduler")]
    Reentrant,

    #[error("task {task} failed: {source}")]
    TaskFailed {
        task: TaskId,
        #[source]
        source: TaskError,
    },
}

/// Shorthand result type for all `simloop-*` crates.
pub type SimResult<T> = Result<T, SimError>;
