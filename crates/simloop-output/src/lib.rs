//! `simloop-output` — reports over a finished activity trace.
//!
//! | Module       | Contents                                             |
//! |--------------|------------------------------------------------------|
//! | [`timeline`] | `timeline`, `render_timeline` (nested begin/end view) |
//! | [`writer`]   | `OutputWriter` trait                                 |
//! | [`csv`]      | `CsvWriter` → `activities.csv`                       |
//! | [`error`]    | `OutputError`, `OutputResult`                        |
//!
//! # Usage
//!
//! ```rust,ignore
//! use simloop_output::{CsvWriter, OutputWriter, render_timeline};
//!
//! sched.run()?;
//! render_timeline(&trace.entries(), &mut std::io::stdout().lock())?;
//!
//! let mut writer = CsvWriter::new(Path::new("./output"))?;
//! writer.write_entries(&trace.entries())?;
//! writer.finish()?;
//! ```

pub mod csv;
pub mod error;
pub mod timeline;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use timeline::{Phase, TimelineEvent, render_timeline, timeline};
pub use writer::OutputWriter;
