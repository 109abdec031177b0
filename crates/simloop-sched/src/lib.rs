//! `simloop-sched` — cooperative single-threaded scheduler on a virtual
//! clock.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                |
//! |----------------|---------------------------------------------------------|
//! | [`scheduler`]  | `Scheduler` (clock, ready queue, run loop)              |
//! | [`builder`]    | `SchedulerBuilder`                                      |
//! | [`sleep_set`]  | `SleepSet` (`BTreeMap<(SimTime, u64), TaskId>`)         |
//! | [`switch`]     | `switch()`, the suspension primitive                    |
//! | [`sync`]       | `HandoffQueue<T>`, `Event`                              |
//! | [`observer`]   | `SchedObserver` trait, `NoopObserver`                   |
//! | [`task`]       | `TaskOutput` (what a task body may return)              |
//!
//! # Task model
//!
//! A task is any `'static` future resolving to `()` or `Result<(), E>`.
//! Tasks run one at a time and only give up control at a suspension point:
//!
//! ```text
//! sched.sleep(d).await          → sleep set, woken at now + d
//! sched.sleep_until(t).await    → sleep set, woken at t
//! queue.get().await             → queue waiting set (only if empty)
//! event.wait().await            → event waiting set (only if unset)
//! switch().await                → ready tail (plain yield)
//! ```
//!
//! Waiting on two suspension points at once from one task (e.g. via a join
//! combinator) is not supported; spawn a second task instead.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use simloop_sched::{HandoffQueue, Scheduler};
//!
//! let sched = Scheduler::new();
//! let queue = HandoffQueue::new(&sched);
//! sched.new_task({
//!     let (sched, queue) = (sched.clone(), queue.clone());
//!     async move {
//!         for i in 0..3 {
//!             queue.put(i);
//!             sched.sleep(TimeDelta::hours(1)).await;
//!         }
//!     }
//! });
//! sched.new_task(async move {
//!     for _ in 0..3 {
//!         println!("{}", queue.get().await);
//!     }
//! });
//! sched.run()?;
//! ```

pub mod builder;
pub mod observer;
pub mod scheduler;
pub mod sleep_set;
pub mod switch;
pub mod sync;
pub mod task;


pub use builder::SchedulerBuilder;
pub use observer::{NoopObserver, SchedObserver};
pub use scheduler::Scheduler;
pub use sleep_set::SleepSet;
pub use switch::{Switch, switch};
pub use sync::{Event, HandoffQueue};
pub use task::TaskOutput;

pub use simloop_core::{SimDuration, SimError, SimResult, SimTime, TaskId};
