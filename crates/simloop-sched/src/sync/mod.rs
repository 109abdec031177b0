//! Synchronization primitives that park tasks on their own waiting sets.
//!
//! Both primitives are handles bound to one [`Scheduler`][crate::Scheduler].
//! Releasing a waiter only moves it to the ready tail; it runs when the loop
//! reaches it.

mod event;
mod queue;

pub use event::Event;
pub use queue::HandoffQueue;
