//! `simloop-trace` — records named intervals of simulated work.
//!
//! | Module      | Contents                     |
//! |-------------|------------------------------|
//! | [`entry`]   | `Entry` (one finished span)  |
//! | [`trace`]   | `Trace`, `Activity`          |
//!
//! Application code wraps spans of simulated work in activities while the
//! scheduler runs, then reads the log once the run loop has returned:
//!
//! ```rust,ignore
//! let trace = Trace::new(&sched);
//! sched.new_task({
//!     let (sched, trace) = (sched.clone(), trace.clone());
//!     async move {
//!         trace.scope("Hike", sched.sleep(TimeDelta::hours(8))).await;
//!     }
//! });
//! sched.run()?;
//! for entry in trace.entries() {
//!     println!("{} .. {} {}", entry.start, entry.end, entry.description);
//! }
//! ```

pub mod entry;
pub mod trace;

#[cfg(test)]
mod tests;

pub use entry::Entry;
pub use trace::{Activity, Trace};
