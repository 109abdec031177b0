//! `SleepSet` — deadline-ordered collection of sleeping tasks.
//!
//! Entries are keyed by `(deadline, sequence)`.  The sequence number comes
//! from the scheduler's strictly increasing counter, so two tasks sleeping
//! until the same instant pop in the order their sleeps were issued and no
//! two keys ever collide.
//!
//! Sequence [`STOP_SEQUENCE`] is never handed to a task.  `run_until` files
//! its stop sentinel under it, which places the sentinel ahead of every task
//! sleeping until the same instant.
//!
//! `BTreeMap` gives O(log S) insert and pop where S is the number of sleepers.

use std::collections::BTreeMap;

use simloop_core::{SimTime, TaskId};

/// Sequence number reserved for the `run_until` stop sentinel.
pub const STOP_SEQUENCE: u64 = 0;

/// A min-priority map from `(deadline, sequence)` to the task sleeping there.
#[derive(Debug, Default)]
pub struct SleepSet {
    inner: BTreeMap<(SimTime, u64), TaskId>,
}

impl SleepSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `task` sleeps until `deadline`.
    ///
    /// `sequence` must be unique among live entries with the same deadline.
    pub fn push(&mut self, deadline: SimTime, sequence: u64, task: TaskId) {
        let previous = self.inner.insert((deadline, sequence), task);
        debug_assert!(previous.is_none(), "duplicate sleep key ({deadline}, {sequence})");
    }

    /// Remove and return the earliest entry, ties broken by sequence.
    pub fn pop(&mut self) -> Option<(SimTime, TaskId)> {
        self.inner
            .pop_first()
            .map(|((deadline, _), task)| (deadline, task))
    }

    /// Withdraw a specific entry without waking it.
    pub fn remove(&mut self, deadline: SimTime, sequence: u64) -> Option<TaskId> {
        self.inner.remove(&(deadline, sequence))
    }

    /// Whether an entry is filed under exactly this key.
    pub fn contains(&self, deadline: SimTime, sequence: u64) -> bool {
        self.inner.contains_key(&(deadline, sequence))
    }

    /// The earliest deadline currently queued, or `None` if empty.
    pub fn next_deadline(&self) -> Option<SimTime> {
        self.inner.keys().next().map(|&(deadline, _)| deadline)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
