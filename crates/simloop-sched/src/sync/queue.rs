//! `HandoffQueue` — unbounded FIFO with suspension when empty.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use simloop_core::TaskId;

use crate::Scheduler;
use crate::switch::switch;

struct Slots<T> {
    items:   VecDeque<T>,
    waiting: VecDeque<TaskId>,
}

/// A producer/consumer buffer between tasks of one scheduler.
///
/// `put` never blocks and there is no capacity limit, so a fast producer can
/// grow the buffer without bound.  `get` on an empty buffer parks the caller;
/// each `put` releases at most one waiter, longest-waiting first.
///
/// Cloning yields another handle to the same buffer.
pub struct HandoffQueue<T> {
    sched: Scheduler,
    slots: Rc<RefCell<Slots<T>>>,
}

impl<T> Clone for HandoffQueue<T> {
    fn clone(&self) -> Self {
        Self {
            sched: self.sched.clone(),
            slots: Rc::clone(&self.slots),
        }
    }
}

impl<T> HandoffQueue<T> {
    pub fn new(sched: &Scheduler) -> Self {
        Self {
            sched: sched.clone(),
            slots: Rc::new(RefCell::new(Slots {
                items:   VecDeque::new(),
                waiting: VecDeque::new(),
            })),
        }
    }

    /// Append `item` and release the longest-waiting consumer, if any.
    pub fn put(&self, item: T) {
        let waiter = {
            let mut slots = self.slots.borrow_mut();
            slots.items.push_back(item);
            slots.waiting.pop_front()
        };
        if let Some(task) = waiter {
            self.sched.make_ready(task);
        }
    }

    /// Take the head item, suspending while the buffer is empty.
    ///
    /// A released waiter normally finds its item untouched.  If a task that
    /// was already ready drains the buffer first, the waiter parks again at
    /// the front of the waiting set and keeps its turn.
    ///
    /// # Panics
    /// Panics if it has to suspend outside a task driven by the scheduler.
    pub async fn get(&self) -> T {
        let mut released = false;
        loop {
            {
                let mut slots = self.slots.borrow_mut();
                if let Some(item) = slots.items.pop_front() {
                    return item;
                }
                let task = self.sched.park_current();
                if released {
                    slots.waiting.push_front(task);
                } else {
                    slots.waiting.push_back(task);
                }
            }
            switch().await;
            released = true;
        }
    }

    /// Items currently buffered.
    pub fn len(&self) -> usize {
        self.slots.borrow().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.borrow().items.is_empty()
    }

    /// Tasks parked in `get`.
    pub fn waiting(&self) -> usize {
        self.slots.borrow().waiting.len()
    }
}
