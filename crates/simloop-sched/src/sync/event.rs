//! `Event` — one-shot broadcast flag.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::mem;
use std::rc::Rc;

use simloop_core::TaskId;

use crate::Scheduler;
use crate::switch::switch;

#[derive(Default)]
struct Flag {
    set:     bool,
    waiting: VecDeque<TaskId>,
}

/// A level-triggered flag that releases every waiter once when set.
///
/// Once set it stays set: later `wait` calls return without suspending.
/// Cloning yields another handle to the same flag.
#[derive(Clone)]
pub struct Event {
    sched: Scheduler,
    flag:  Rc<RefCell<Flag>>,
}

impl Event {
    pub fn new(sched: &Scheduler) -> Self {
        Self {
            sched: sched.clone(),
            flag:  Rc::new(RefCell::new(Flag::default())),
        }
    }

    /// Set the flag and move all current waiters to the ready tail in the
    /// order they started waiting.  Setting an already-set event is a no-op.
    pub fn set(&self) {
        let released = {
            let mut flag = self.flag.borrow_mut();
            flag.set = true;
            mem::take(&mut flag.waiting)
        };
        for task in released {
            self.sched.make_ready(task);
        }
    }

    pub fn is_set(&self) -> bool {
        self.flag.borrow().set
    }

    /// Suspend until the flag is set.  Returns immediately if it already is.
    ///
    /// # Panics
    /// Panics if it has to suspend outside a task driven by the scheduler.
    pub async fn wait(&self) {
        {
            let mut flag = self.flag.borrow_mut();
            if flag.set {
                return;
            }
            let task = self.sched.park_current();
            flag.waiting.push_back(task);
        }
        switch().await;
    }

    /// Tasks parked in `wait`.
    pub fn waiting(&self) -> usize {
        self.flag.borrow().waiting.len()
    }
}
