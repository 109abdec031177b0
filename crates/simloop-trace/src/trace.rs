//! The `Trace` log and the live `Activity` handle.
//!
//! # Lifecycle
//!
//! ```text
//! trace.activity(desc)   → Activity { id, start = now }   (nothing logged)
//! activity.start()       → start = now
//! activity.finish()      → end = now; Entry appended to the trace
//! ```
//!
//! An activity that is never finished leaves no trace.  That covers a task
//! dropped while suspended and a panic unwinding through the span.  Entries
//! appear in completion order, so nested spans land before the span that
//! encloses them.

use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

use log::debug;
use simloop_core::{ActivityId, SimTime};
use simloop_sched::Scheduler;

use crate::Entry;

#[derive(Default)]
struct Log {
    entries: Vec<Entry>,
    last_id: u64,
}

/// Append-only log of finished activities, stamped from one scheduler's
/// clock.
///
/// Cloning yields another handle to the same log.
#[derive(Clone)]
pub struct Trace {
    sched: Scheduler,
    log:   Rc<RefCell<Log>>,
}

impl Trace {
    pub fn new(sched: &Scheduler) -> Self {
        Self {
            sched: sched.clone(),
            log:   Rc::default(),
        }
    }

    /// Open a new activity with a fresh id.  Its start is provisionally the
    /// current instant.
    pub fn activity(&self, description: impl Into<String>) -> Activity {
        let id = {
            let mut log = self.log.borrow_mut();
            log.last_id += 1;
            ActivityId(log.last_id)
        };
        Activity {
            trace:       self.clone(),
            id,
            description: description.into(),
            start:       self.sched.now(),
        }
    }

    /// Run `body` inside a started activity and finish it once `body`
    /// completes, whatever it returns.
    ///
    /// If the enclosing task is dropped while `body` is suspended, nothing
    /// is recorded.
    pub async fn scope<F: Future>(&self, description: impl Into<String>, body: F) -> F::Output {
        let mut activity = self.activity(description);
        activity.start();
        let output = body.await;
        activity.finish();
        output
    }

    /// Snapshot of the log in completion order.
    pub fn entries(&self) -> Vec<Entry> {
        self.log.borrow().entries.clone()
    }

    /// Number of finished activities.
    pub fn len(&self) -> usize {
        self.log.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.borrow().entries.is_empty()
    }

    fn append(&self, entry: Entry) {
        self.log.borrow_mut().entries.push(entry);
    }
}

/// A live, not yet finished activity.
pub struct Activity {
    trace:       Trace,
    id:          ActivityId,
    description: String,
    start:       SimTime,
}

impl Activity {
    pub fn id(&self) -> ActivityId {
        self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// The start instant recorded so far.
    pub fn start_time(&self) -> SimTime {
        self.start
    }

    /// Stamp the start with the current instant.
    pub fn start(&mut self) {
        self.start = self.trace.sched.now();
        debug!("Started activity at {}: {}", self.start, self.description);
    }

    /// Stamp the end with the current instant and append the finished entry
    /// to the trace.
    pub fn finish(self) -> Entry {
        let end = self.trace.sched.now();
        debug!("Finished activity at {end}: {}", self.description);
        let entry = Entry {
            id:          self.id,
            start:       self.start,
            end,
            description: self.description,
        };
        self.trace.append(entry.clone());
        entry
    }
}
