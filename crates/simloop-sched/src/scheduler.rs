//! The `Scheduler` handle and its run loop.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::future::{self, Future};
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

use log::{debug, trace};
use simloop_core::{IntoDeadline, SimDuration, SimError, SimResult, SimTime, TaskId};

use crate::sleep_set::{STOP_SEQUENCE, SleepSet};
use crate::switch::switch;
use crate::task::{Halt, TaskFuture, TaskOutput};
use crate::{NoopObserver, SchedObserver};

// ── Shared state ──────────────────────────────────────────────────────────────

/// Everything one simulation context owns.
///
/// A task lives in exactly one place at a time: its id sits in `ready`, in
/// `sleeping`, in some queue's or event's waiting set, or in `polling` while
/// it executes.  Its future sits in `parked` whenever it is not being polled.
struct Core {
    /// The virtual clock.
    now: SimTime,

    /// Tasks eligible to run, strict FIFO.
    ready: VecDeque<TaskId>,

    /// Tasks waiting for a deadline.
    sleeping: SleepSet,

    /// Bodies of every live task except the one being polled.
    parked: HashMap<TaskId, TaskFuture>,

    /// The task being polled right now.
    polling: Option<TaskId>,

    /// Equal to `polling` until the task parks itself somewhere; a task
    /// still marked current when it yields goes back to the ready tail.
    current: Option<TaskId>,

    /// The hidden `run_until` task, while one is armed.
    stop: Option<(SimTime, TaskId)>,

    next_task: TaskId,

    /// Tie-break counter for equal deadlines.  Starts above `STOP_SEQUENCE`.
    sequence: u64,

    /// Set for the duration of a run loop.
    running: bool,
}

impl Core {
    fn new(start: SimTime) -> Self {
        Self {
            now:       start,
            ready:     VecDeque::new(),
            sleeping:  SleepSet::new(),
            parked:    HashMap::new(),
            polling:   None,
            current:   None,
            stop:      None,
            next_task: TaskId(0),
            sequence:  STOP_SEQUENCE,
            running:   false,
        }
    }

    fn alloc_task(&mut self) -> TaskId {
        let id = self.next_task;
        self.next_task = id.next();
        id
    }

    /// Detach the polled task from "currently executing" so the run loop
    /// does not requeue it when it yields.  The caller files the returned id
    /// wherever the task should wait.
    fn park_current(&mut self) -> TaskId {
        let Some(task) = self.polling else {
            panic!("suspension point awaited outside a task driven by this scheduler");
        };
        assert!(
            self.current.take().is_some(),
            "{task} waited on two suspension points in one resumption"
        );
        task
    }

    /// Pick the next task to resume, advancing the clock when only sleepers
    /// remain.  Returns `None` when nothing is left to run.
    fn next_ready(&mut self) -> Option<(TaskId, TaskFuture)> {
        loop {
            if self.ready.is_empty() {
                let (deadline, task) = self.sleeping.pop()?;
                if deadline > self.now {
                    self.now = deadline;
                }
                self.ready.push_back(task);
            }
            let task = self.ready.pop_front()?;
            // An id without a parked body belongs to a task that already
            // finished; skip it.
            if let Some(future) = self.parked.remove(&task) {
                self.polling = Some(task);
                self.current = Some(task);
                return Some((task, future));
            }
        }
    }

    /// File the stop sentinel at `deadline`, ahead of any task sleeping until
    /// the same instant.
    fn arm_stop(&mut self, deadline: SimTime) {
        let sentinel = self.alloc_task();
        let body: TaskFuture = Box::pin(future::ready(Err::<(), _>(Halt::Stop)));
        self.parked.insert(sentinel, body);
        self.sleeping.push(deadline, STOP_SEQUENCE, sentinel);
        self.stop = Some((deadline, sentinel));
    }

    /// Withdraw the stop sentinel if it has not fired.
    fn disarm_stop(&mut self) {
        if let Some((deadline, sentinel)) = self.stop.take() {
            if self.parked.remove(&sentinel).is_some() {
                self.sleeping.remove(deadline, STOP_SEQUENCE);
                self.ready.retain(|&task| task != sentinel);
            }
        }
    }

    fn is_stop(&self, task: TaskId) -> bool {
        matches!(self.stop, Some((_, sentinel)) if sentinel == task)
    }

    /// The armed sentinel still sits in the sleep set.
    fn stop_sleeping(&self) -> bool {
        self.stop
            .is_some_and(|(deadline, _)| self.sleeping.contains(deadline, STOP_SEQUENCE))
    }

    /// The armed sentinel has not fired yet.
    fn stop_live(&self) -> bool {
        self.stop.is_some_and(|(_, sentinel)| {
            self.parked.contains_key(&sentinel) || self.polling == Some(sentinel)
        })
    }
}

/// Marks the context as running; clears the mark on every exit path,
/// including a panic unwinding out of a task.
struct RunGuard<'a> {
    core: &'a RefCell<Core>,
}

impl<'a> RunGuard<'a> {
    fn enter(core: &'a RefCell<Core>) -> SimResult<Self> {
        let mut state = core.borrow_mut();
        if state.running {
            return Err(SimError::Reentrant);
        }
        state.running = true;
        Ok(Self { core })
    }
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        let mut state = self.core.borrow_mut();
        state.running = false;
        state.polling = None;
        state.current = None;
        state.disarm_stop();
    }
}

// ── Scheduler ─────────────────────────────────────────────────────────────────

/// Handle to one simulation context: the virtual clock, the ready queue, and
/// the sleep set.
///
/// Cloning is cheap and every clone drives the same context.  Tasks,
/// [`HandoffQueue`][crate::HandoffQueue]s, [`Event`][crate::Event]s, and
/// traces each hold a clone.  The context is single-threaded (`!Send`).
///
/// A task left sleeping or waiting after a run keeps its own clone alive, so
/// dropping the outside handles does not free it.  Call
/// [`shutdown`][Self::shutdown] once the simulation is over.
///
/// # Run loop
///
/// ```text
/// while ready or sleeping:
///   if ready is empty:
///     pop earliest (deadline, seq) sleeper; clock = max(clock, deadline)
///     push it on the ready tail
///   pop the ready head; poll it once
///     completed       → drop it
///     parked itself   → its sleep set / queue / event re-schedules it
///     plain yield     → push it back on the ready tail
/// ```
///
/// Create via [`Scheduler::new`] or [`SchedulerBuilder`][crate::SchedulerBuilder].
#[derive(Clone)]
pub struct Scheduler {
    core: Rc<RefCell<Core>>,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    /// An empty scheduler whose clock starts at `2000-01-01 00:00:00`.
    pub fn new() -> Self {
        Self::starting_at(SimTime::default())
    }

    /// An empty scheduler whose clock starts at `start`.
    pub fn starting_at(start: SimTime) -> Self {
        Self {
            core: Rc::new(RefCell::new(Core::new(start))),
        }
    }

    // ── Task registration ─────────────────────────────────────────────────

    /// Append `task` to the ready tail.  It runs once the loop reaches it,
    /// never synchronously.
    ///
    /// May be called from inside a running task.
    pub fn new_task<F>(&self, task: F) -> TaskId
    where
        F: Future + 'static,
        F::Output: TaskOutput,
    {
        let mut core = self.core.borrow_mut();
        let id = core.alloc_task();
        let body: TaskFuture = Box::pin(async move {
            task.await
                .into_result()
                .map_err(|source| Halt::Failed(id, source))
        });
        core.parked.insert(id, body);
        core.ready.push_back(id);
        trace!("registered {id}");
        id
    }

    // ── Clock ─────────────────────────────────────────────────────────────

    /// The current instant on the virtual clock.
    pub fn now(&self) -> SimTime {
        self.core.borrow().now
    }

    /// Suspend the calling task for `duration` of simulated time.
    ///
    /// The deadline is computed when the returned future is first polled and
    /// saturates at the ends of the calendar range.
    ///
    /// # Panics
    /// Panics if awaited outside a task driven by this scheduler.
    pub async fn sleep(&self, duration: SimDuration) {
        let deadline = self.now() + duration;
        self.sleep_at(deadline).await;
    }

    /// Suspend the calling task until `deadline`.
    ///
    /// Dates mean midnight; strings are parsed as ISO-8601 and an
    /// unparseable one fails without suspending.
    ///
    /// # Panics
    /// Panics if awaited outside a task driven by this scheduler.
    pub async fn sleep_until<D: IntoDeadline>(&self, deadline: D) -> SimResult<()> {
        let deadline = deadline.into_deadline()?;
        self.sleep_at(deadline).await;
        Ok(())
    }

    async fn sleep_at(&self, deadline: SimTime) {
        {
            let mut core = self.core.borrow_mut();
            let task = core.park_current();
            core.sequence += 1;
            let sequence = core.sequence;
            core.sleeping.push(deadline, sequence, task);
        }
        switch().await;
    }

    // ── Hooks for the sync primitives ─────────────────────────────────────

    /// Detach the polled task so a waiting set can own its wake-up.
    pub(crate) fn park_current(&self) -> TaskId {
        self.core.borrow_mut().park_current()
    }

    /// Move a parked task to the ready tail.
    pub(crate) fn make_ready(&self, task: TaskId) {
        self.core.borrow_mut().ready.push_back(task);
    }

    // ── Running ───────────────────────────────────────────────────────────

    /// Run until no task is ready or sleeping.
    ///
    /// Tasks still parked on a queue or event when the loop drains stay
    /// parked.  The first task error aborts the run.
    pub fn run(&self) -> SimResult<()> {
        self.run_with(&mut NoopObserver)
    }

    /// [`run`][Self::run] with observer callbacks.
    pub fn run_with<O: SchedObserver>(&self, observer: &mut O) -> SimResult<()> {
        let _guard = RunGuard::enter(&self.core)?;
        debug!("run loop started at {}", self.now());
        let outcome = self.drive(observer);
        self.finish(outcome, observer)
    }

    /// Run until the clock reaches `deadline`, then stop.
    ///
    /// The clock ends at exactly `max(now, deadline)`.  No task sleeping
    /// until `deadline` or later is resumed, including one whose sleep was
    /// issued before this call; such tasks stay in the sleep set and a later
    /// run continues them.
    pub fn run_until<D: IntoDeadline>(&self, deadline: D) -> SimResult<()> {
        self.run_until_with(deadline, &mut NoopObserver)
    }

    /// [`run_until`][Self::run_until] with observer callbacks.
    pub fn run_until_with<D, O>(&self, deadline: D, observer: &mut O) -> SimResult<()>
    where
        D: IntoDeadline,
        O: SchedObserver,
    {
        let deadline = deadline.into_deadline()?;
        let _guard = RunGuard::enter(&self.core)?;
        self.core.borrow_mut().arm_stop(deadline);
        debug!("run loop started at {}, stopping at {deadline}", self.now());
        let outcome = self.drive(observer);
        self.core.borrow_mut().disarm_stop();
        self.finish(outcome, observer)
    }

    fn finish<O: SchedObserver>(&self, outcome: Result<(), Halt>, observer: &mut O) -> SimResult<()> {
        let now = self.now();
        debug!("run loop stopped at {now}");
        observer.on_run_end(now);
        match outcome {
            Ok(()) | Err(Halt::Stop) => Ok(()),
            Err(Halt::Failed(task, source)) => Err(SimError::TaskFailed { task, source }),
        }
    }

    fn drive<O: SchedObserver>(&self, observer: &mut O) -> Result<(), Halt> {
        let mut cx = Context::from_waker(Waker::noop());
        loop {
            let before = self.now();
            let next = self.core.borrow_mut().next_ready();
            let Some((task, mut body)) = next else {
                return Ok(());
            };

            let (now, hidden) = {
                let core = self.core.borrow();
                (core.now, core.is_stop(task))
            };
            if now > before {
                trace!("clock {before} -> {now}");
                observer.on_clock_advance(before, now);
            }
            if !hidden {
                trace!("resuming {task} at {now}");
                observer.on_resume(task, now);
            }

            // The core must not be borrowed here: the task body uses it.
            let polled = body.as_mut().poll(&mut cx);

            let mut core = self.core.borrow_mut();
            core.polling = None;
            match polled {
                Poll::Pending => {
                    if let Some(task) = core.current.take() {
                        core.ready.push_back(task);
                    }
                    core.parked.insert(task, body);
                }
                Poll::Ready(result) => {
                    core.current = None;
                    drop(core);
                    drop(body);
                    result?;
                    trace!("{task} done");
                    observer.on_task_done(task, now);
                }
            }
        }
    }

    // ── Teardown ──────────────────────────────────────────────────────────

    /// Drop every unfinished task, wherever it waits.
    ///
    /// Queues and events may still hold the ids of dropped tasks; releasing
    /// one later is harmless.  Tasks registered afterwards run normally.
    pub fn shutdown(&self) -> SimResult<()> {
        let bodies = {
            let mut core = self.core.borrow_mut();
            if core.running {
                return Err(SimError::Reentrant);
            }
            core.ready.clear();
            core.sleeping = SleepSet::new();
            core.stop = None;
            std::mem::take(&mut core.parked)
        };
        debug!("shutting down {} unfinished task(s)", bodies.len());
        // Bodies own scheduler clones and other handles; drop them with the
        // core released.
        drop(bodies);
        Ok(())
    }

    // ── Introspection ─────────────────────────────────────────────────────

    /// Number of tasks on the ready queue.
    pub fn ready_len(&self) -> usize {
        self.core.borrow().ready.len()
    }

    /// Number of tasks in the sleep set.
    pub fn sleeping_len(&self) -> usize {
        let core = self.core.borrow();
        core.sleeping.len() - usize::from(core.stop_sleeping())
    }

    /// Number of live (registered, not yet finished) tasks, wherever they
    /// currently wait.
    pub fn task_count(&self) -> usize {
        let core = self.core.borrow();
        core.parked.len() + usize::from(core.polling.is_some()) - usize::from(core.stop_live())
    }

    /// `true` when nothing is ready or sleeping.  Tasks may still be parked
    /// on a queue or event.
    pub fn is_idle(&self) -> bool {
        let core = self.core.borrow();
        core.ready.is_empty() && core.sleeping.len() == usize::from(core.stop_sleeping())
    }
}
